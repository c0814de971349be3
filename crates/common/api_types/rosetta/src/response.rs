use serde::{Deserialize, Serialize};

use crate::{
    block::Block,
    identifier::BlockIdentifier,
    network::{Allow, NetworkIdentifier, Version},
    peer::Peer,
    sync_status::SyncStatus,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkListResponse {
    pub network_identifiers: Vec<NetworkIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkOptionsResponse {
    pub version: Version,
    pub allow: Allow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatusResponse {
    pub current_block_identifier: BlockIdentifier,

    /// Milliseconds since the unix epoch.
    pub current_block_timestamp: i64,
    pub genesis_block_identifier: BlockIdentifier,
    pub sync_status: SyncStatus,
    pub peers: Vec<Peer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResponse {
    pub block: Block,
}
