use std::fmt;

use alloy_primitives::{B256, aliases::B32};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockHeader {
    #[serde(with = "serde_utils::quoted_u64")]
    pub slot: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub proposer_index: u64,
    pub parent_root: B256,
    pub state_root: B256,
    pub body_root: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
}

/// One entry of the block list returned by `/eth/v1/beacon/headers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderData {
    pub root: B256,
    pub canonical: bool,
    pub header: SignedBeaconBlockHeader,
}

impl BlockHeaderData {
    pub fn slot(&self) -> u64 {
        self.header.message.slot
    }

    pub fn parent_root(&self) -> B256 {
        self.header.message.parent_root
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_time: u64,
    pub genesis_validators_root: B256,
    pub genesis_fork_version: B32,
}

/// A peer as reported by `/eth/v1/node/peers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub peer_id: String,
    pub enr: Option<String>,
    pub last_seen_p2p_address: String,
    pub state: String,
    pub direction: String,
}

/// Filter for a block-list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFilter {
    Slot(u64),
    Root(B256),
}

impl fmt::Display for BlockFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockFilter::Slot(slot) => write!(f, "slot {slot}"),
            BlockFilter::Root(root) => write!(f, "root {root}"),
        }
    }
}
