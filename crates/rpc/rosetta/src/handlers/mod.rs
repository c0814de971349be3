use std::sync::Arc;

use ream_api_types_rosetta::error::{Error, ErrorKind};
use ream_rosetta_client::client::BlockchainClient;

use crate::config::RosettaConfig;

pub mod account;
pub mod block;
pub mod construction;
pub mod mempool;
pub mod network;

/// The beacon node client, absent when serving offline.
pub type SharedClient = Option<Arc<dyn BlockchainClient>>;

/// Returns the client if the server is online and connected.
pub(crate) fn online_client<'a>(
    config: &RosettaConfig,
    client: &'a SharedClient,
) -> Result<&'a Arc<dyn BlockchainClient>, Error> {
    config.ensure_online()?;
    client
        .as_ref()
        .ok_or_else(|| ErrorKind::UnavailableOffline.error())
}
