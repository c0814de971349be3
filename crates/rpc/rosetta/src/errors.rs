use ream_api_types_rosetta::error::{Error, ErrorKind};
use ream_rosetta_client::errors::BeaconClientError;
use tracing::warn;

/// Maps a failed beacon node query onto the Rosetta error catalog.
pub fn client_error(err: BeaconClientError) -> Error {
    match err {
        BeaconClientError::NotFound(_) => ErrorKind::BlockOrphaned.wrap(&err),
        BeaconClientError::InvalidQuery | BeaconClientError::MalformedInput { .. } => {
            ErrorKind::InvalidBlockQuery.wrap(&err)
        }
        _ => {
            warn!("Beacon node query failed: {err}");
            ErrorKind::Beacon.wrap(&err)
        }
    }
}
