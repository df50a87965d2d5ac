//! Membership & Discovery Module
//!
//! Implements a Gossip-based membership protocol (inspired by SWIM) to manage the cluster topology.
//! Nodes use this service to discover each other, detect failures, and disseminate cluster state
//! updates, including which bus channels each node serves.
//!
//! ## Core Mechanisms
//! - **Gossip Protocol**: Nodes periodically exchange status updates via UDP to maintain a consistent view of the cluster.
//! - **Failure Detection**: Uses a "Suspect" -> "Dead" transition model with timeouts to handle node crashes gracefully.
//! - **Incarnation Numbers**: Solves conflict resolution when node state (Alive/Suspect) or a
//!   channel registration is disputed.
//! - **Single-shot Join**: A joiner fires one Join per seed and reports readiness (or a fatal
//!   timeout) exactly once; retries are a bootstrap concern, not a membership one.

pub mod service;
pub mod types;
