use crate::{NodeId, NodePair};
use serde::{Deserialize, Serialize};

/// Payload POSTed to the bridge-detection service.
///
/// `nodes` is a count, not an id list: the service identifies nodes by the
/// integers appearing in `edges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub nodes: u64,
    pub edges: Vec<[NodeId; 2]>,
}

/// Response from the bridge-detection service. A missing `bridges` field
/// is treated as an empty classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeResponse {
    #[serde(default)]
    pub bridges: Vec<[NodeId; 2]>,
}

impl BridgeResponse {
    /// The returned pairs as unordered [`NodePair`]s, in response order.
    pub fn pairs(&self) -> Vec<NodePair> {
        self.bridges.iter().map(|b| NodePair(b[0], b[1])).collect()
    }
}
