use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod protocol;

pub use error::EdgeRejected;
pub use protocol::{BridgeRequest, BridgeResponse};

/// Identifier of a node. Assigned monotonically by the graph store,
/// never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an edge. Separate counter namespace from [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The interpretation applied to pointer clicks on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolMode {
    /// Clicks on empty space create nodes.
    #[default]
    Node,
    /// Clicks on nodes build an edge in two steps.
    Connector,
    /// Clicks only select nodes and edges.
    Select,
}

/// The at-most-one selected canvas element, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Node(NodeId),
    Edge(EdgeId),
}

/// Unordered pair of node ids. Used for bridge classification results,
/// where `(u, v)` and `(v, u)` name the same edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePair(pub NodeId, pub NodeId);

impl NodePair {
    /// True if this pair joins `u` and `v` in either orientation.
    pub fn joins(&self, u: NodeId, v: NodeId) -> bool {
        (self.0 == u && self.1 == v) || (self.0 == v && self.1 == u)
    }
}

impl fmt::Display for NodePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.0, self.1)
    }
}
