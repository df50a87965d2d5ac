//! Clustered Order Service Library
//!
//! This library crate defines the core modules of the two-node order system.
//! It serves as the foundation for the node binaries (`order-node`, `gateway-node`).
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`address`**: Advertise-address selection. Picks the one IPv4 address a
//!   node publishes for cluster discovery (non-loopback, non-10.x, first match).
//! - **`membership`**: The cluster coordination layer. Uses a UDP-based Gossip
//!   protocol (SWIM-like) for node discovery, failure detection, and the
//!   dissemination of each node's bus address and registered channels.
//! - **`bus`**: The command bus. Request/reply and fire-and-forget messaging
//!   addressed by logical channel name; every command is delivered to exactly
//!   one live handler, anywhere in the cluster.
//! - **`store`**: The durable state layer. Owns the orders document and
//!   serializes all read-modify-write cycles against it, so concurrent
//!   appends can never lose an update.
//! - **`gateway`**: The HTTP front door. Translates inbound requests into bus
//!   requests and bus errors into status codes.

pub mod address;
pub mod bus;
pub mod gateway;
pub mod membership;
pub mod store;
