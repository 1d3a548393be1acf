use crate::NodeId;
use thiserror::Error;

/// Why an edge creation attempt was refused by the graph store.
///
/// Rejection is a policy outcome, not a failure: the connector tool
/// swallows it silently, while tests and callers that care can inspect it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRejected {
    #[error("edge would connect node {0} to itself")]
    SelfLoop(NodeId),
    #[error("an edge between nodes {0} and {1} already exists")]
    Duplicate(NodeId, NodeId),
}
