use ream_beacon_api_client::{errors::BeaconApiError, types::BlockFilter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeaconClientError {
    #[error("Unable to connect to beacon node: {0}")]
    Connection(#[source] BeaconApiError),

    #[error("Beacon node RPC failed: {0}")]
    UpstreamRpc(#[from] BeaconApiError),

    #[error("No block found for {0}")]
    NotFound(BlockFilter),

    #[error("Query must be hash or index")]
    InvalidQuery,

    #[error("Malformed block hash {hash:?}: {reason}")]
    MalformedInput { hash: String, reason: String },

    #[error("Request to beacon node was cancelled")]
    Cancelled,
}
