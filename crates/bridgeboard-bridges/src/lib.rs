//! Bridge-query adapter.
//!
//! Pure translation between the editor's graph snapshot and the remote
//! bridge-detection service; the classification algorithm itself lives on
//! the other end of the wire. The blocking HTTP call runs on a worker
//! thread and reports back over a channel, so the UI event loop never
//! stalls on the network.

use bridgeboard_core::NodePair;
use bridgeboard_core::protocol::{BridgeRequest, BridgeResponse};
use crossbeam_channel::Sender;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum BridgeQueryError {
    /// Caller precondition: detection is meaningless on an empty graph.
    /// Raised before any I/O happens.
    #[error("the graph is empty; create or generate a graph first")]
    EmptyGraph,
    #[error("bridge service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bridge service answered with status {0}")]
    Status(StatusCode),
}

/// Result of one detection call, tagged with the graph generation the
/// request was built from so stale answers can be discarded.
#[derive(Debug)]
pub struct BridgeOutcome {
    pub generation: u64,
    pub result: Result<Vec<NodePair>, BridgeQueryError>,
}

/// Blocking client for the bridge-detection service.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl BridgeClient {
    /// Build a client for the service at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, BridgeQueryError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// POST the graph snapshot and interpret the response as a set of
    /// unordered bridge pairs. No automatic retry; the user re-triggers
    /// detection after a failure.
    pub fn detect(&self, request: &BridgeRequest) -> Result<Vec<NodePair>, BridgeQueryError> {
        if request.nodes == 0 {
            return Err(BridgeQueryError::EmptyGraph);
        }

        let url = format!("{}/bridges", self.base_url);
        debug!(%url, nodes = request.nodes, edges = request.edges.len(), "querying bridge service");

        let response = self.http.post(&url).json(request).send()?;
        if !response.status().is_success() {
            return Err(BridgeQueryError::Status(response.status()));
        }

        let body: BridgeResponse = response.json()?;
        Ok(body.pairs())
    }
}

/// Run `detect` on a worker thread, delivering the outcome (tagged with
/// `generation`) over `sender`. The UI thread polls the receiving end each
/// frame; a dropped receiver simply discards the outcome.
pub fn spawn_detect(
    client: BridgeClient,
    generation: u64,
    request: BridgeRequest,
    sender: Sender<BridgeOutcome>,
) {
    std::thread::spawn(move || {
        let result = client.detect(&request);
        if let Err(err) = &result {
            error!(%err, "bridge detection failed");
        }
        let _ = sender.send(BridgeOutcome { generation, result });
    });
}
