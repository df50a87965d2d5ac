use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Instant;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum NodeState {
    Alive,
    Suspect,
    Dead,
}

/// Represents a single member in the cluster.
///
/// Carries identity, network addressing, and current lifecycle state. The
/// `incarnation` field is a logical clock used to order updates and resolve
/// conflicts (refuting a false "Suspect" claim, propagating a newer channel
/// set). `channels` is the list of bus channels this node has a handler
/// registered for; it travels with the member record so every node can route
/// commands without a separate registry protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub gossip_addr: SocketAddr,
    pub bus_addr: SocketAddr,
    pub state: NodeState,
    pub incarnation: u64,
    pub channels: Vec<String>,

    #[serde(skip)]
    pub last_seen: Option<Instant>,
}

impl Node {
    pub fn serves(&self, channel: &str) -> bool {
        self.channels.iter().any(|c| c == channel)
    }
}

/// The wire protocol for inter-node gossip.
///
/// - `Ping/Ack`: liveness checks and full state synchronization (the Ack
///   carries the sender's member view, channels included).
/// - `Join`: sent once by a new node to each seed to enter the cluster.
/// - `Suspect/Alive`: disseminates changes in node health.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GossipMessage {
    Ping {
        from: NodeId,
        incarnation: u64,
    },

    Ack {
        from: NodeId,
        incarnation: u64,
        members: Vec<Node>,
    },

    Join {
        node: Node,
    },

    Suspect {
        node_id: NodeId,
        incarnation: u64,
    },

    Alive {
        node_id: NodeId,
        incarnation: u64,
    },
}
