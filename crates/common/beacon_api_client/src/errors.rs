use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeaconApiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("Invalid beacon node URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Beacon node URL must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("Request to beacon node failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Beacon node returned {status} for {endpoint}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("Beacon node has no data for {0}")]
    NotFound(String),
}
