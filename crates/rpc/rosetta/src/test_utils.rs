use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use ream_api_types_rosetta::{
    identifier::{BlockIdentifier, PartialBlockIdentifier},
    peer::Peer,
    request::NetworkRequest,
    sync_status::{SyncStage, SyncStatus},
};
use ream_beacon_api_client::{errors::BeaconApiError, types::BlockFilter};
use ream_network_spec::networks::NetworkSpec;
use ream_rosetta_client::{
    client::{BlockchainClient, NodeStatus},
    errors::BeaconClientError,
    resolver::{BlockQuery, ParentIdentifier, ResolvedBlock, decode_root},
};
use tokio_util::sync::CancellationToken;

const GENESIS_TIME: u64 = 1606824023;

/// Slot whose parent the fake node pretends not to know.
pub const ORPHANED_PARENT_SLOT: u64 = 50;

/// Highest slot the fake node has a block for.
pub const HEAD_SLOT: u64 = 99;

pub fn network_request(network: &NetworkSpec) -> NetworkRequest {
    NetworkRequest {
        network_identifier: network.network_identifier(),
        metadata: None,
    }
}

fn block_hash(slot: u64) -> String {
    format!("0x{slot:064x}")
}

/// Canned [`BlockchainClient`] that counts the calls it serves.
#[derive(Debug, Clone)]
pub struct FakeClient {
    timestamp_millis: u64,
    failing: bool,
    status_calls: Arc<AtomicUsize>,
    block_calls: Arc<AtomicUsize>,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            timestamp_millis: 1606824143000,
            failing: false,
            status_calls: Arc::default(),
            block_calls: Arc::default(),
        }
    }
}

impl FakeClient {
    pub fn with_timestamp_millis(mut self, timestamp_millis: u64) -> Self {
        self.timestamp_millis = timestamp_millis;
        self
    }

    /// Every query fails as if the beacon node were unreachable.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn block_calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }

    fn upstream_failure(&self) -> Result<(), BeaconClientError> {
        if self.failing {
            return Err(BeaconClientError::UpstreamRpc(BeaconApiError::NotFound(
                "/eth/v1/beacon/headers/head".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BlockchainClient for FakeClient {
    async fn status(&self, _token: &CancellationToken) -> Result<NodeStatus, BeaconClientError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.upstream_failure()?;

        Ok(NodeStatus {
            current_block: BlockIdentifier::new(5, block_hash(5)),
            timestamp_millis: self.timestamp_millis,
            genesis_block: BlockIdentifier::new(0, block_hash(0)),
            sync_status: SyncStatus::new(5, 10, SyncStage::Syncing),
            peers: vec![Peer {
                peer_id: "peer-a".to_string(),
                metadata: Default::default(),
            }],
        })
    }

    async fn block(
        &self,
        _token: &CancellationToken,
        identifier: &PartialBlockIdentifier,
    ) -> Result<ResolvedBlock, BeaconClientError> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        self.upstream_failure()?;

        let slot = match BlockQuery::try_from(identifier)? {
            BlockQuery::Index(slot) => slot,
            BlockQuery::Hash(hash) => {
                let root = decode_root(&hash)?;
                return Err(BeaconClientError::NotFound(BlockFilter::Root(root)));
            }
        };
        if slot > HEAD_SLOT {
            return Err(BeaconClientError::NotFound(BlockFilter::Slot(slot)));
        }

        let parent = match slot {
            0 => ParentIdentifier::Genesis,
            ORPHANED_PARENT_SLOT => ParentIdentifier::Unresolved {
                parent_root: decode_root(&block_hash(slot - 1))?,
            },
            _ => ParentIdentifier::Resolved(BlockIdentifier::new(slot - 1, block_hash(slot - 1))),
        };

        Ok(ResolvedBlock {
            identifier: BlockIdentifier::new(slot, block_hash(slot)),
            parent,
            timestamp_millis: (GENESIS_TIME + 12 * slot) * 1000,
            epoch: slot / 32,
            transactions: vec![],
        })
    }
}
