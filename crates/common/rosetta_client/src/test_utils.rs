use std::sync::{Arc, Mutex};

use alloy_primitives::{B256, aliases::B32};
use async_trait::async_trait;
use ream_beacon_api_client::{
    StatusCode,
    errors::BeaconApiError,
    rpc::BeaconNodeRpc,
    types::{
        BeaconBlockHeader, BlockFilter, BlockHeaderData, Genesis, PeerRecord,
        SignedBeaconBlockHeader,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    ChainHead,
    Genesis,
    Peers,
    Blocks(BlockFilter),
}

/// In-memory beacon node that records every RPC it serves.
#[derive(Debug, Clone, Default)]
pub struct FakeBeaconNode {
    genesis_time: u64,
    headers: Vec<BlockHeaderData>,
    peers: Vec<PeerRecord>,
    fail_genesis: bool,
    fail_root_queries: bool,
    stalled: bool,
    calls: Arc<Mutex<Vec<RpcCall>>>,
}

pub fn root_for_slot(slot: u64) -> B256 {
    B256::left_padding_from(&(slot + 1).to_be_bytes())
}

pub fn header_at(slot: u64, root: B256, parent_root: B256, canonical: bool) -> BlockHeaderData {
    BlockHeaderData {
        root,
        canonical,
        header: SignedBeaconBlockHeader {
            message: BeaconBlockHeader {
                slot,
                proposer_index: slot % 64,
                parent_root,
                state_root: B256::ZERO,
                body_root: B256::ZERO,
            },
        },
    }
}

impl FakeBeaconNode {
    pub const GENESIS_VALIDATORS_ROOT: B256 = B256::repeat_byte(0x4b);

    /// Adds canonical blocks at slots `0..length`, each linked to the previous one.
    pub fn with_chain(mut self, genesis_time: u64, length: u64) -> Self {
        self.genesis_time = genesis_time;
        for slot in 0..length {
            let parent_root = match slot {
                0 => B256::ZERO,
                _ => root_for_slot(slot - 1),
            };
            self.headers.push(header_at(slot, root_for_slot(slot), parent_root, true));
        }
        self
    }

    pub fn with_header(mut self, header: BlockHeaderData) -> Self {
        self.headers.push(header);
        self
    }

    pub fn with_peer(mut self, peer_id: &str, enr: Option<&str>) -> Self {
        self.peers.push(PeerRecord {
            peer_id: peer_id.to_string(),
            enr: enr.map(str::to_string),
            last_seen_p2p_address: "/ip4/127.0.0.1/tcp/9000".to_string(),
            state: "connected".to_string(),
            direction: "outbound".to_string(),
        });
        self
    }

    pub fn failing_genesis(mut self) -> Self {
        self.fail_genesis = true;
        self
    }

    pub fn failing_root_queries(mut self) -> Self {
        self.fail_root_queries = true;
        self
    }

    /// Every RPC hangs until the caller gives up on it.
    pub fn stalled(mut self) -> Self {
        self.stalled = true;
        self
    }

    pub fn root_at(&self, slot: u64) -> Option<B256> {
        self.headers
            .iter()
            .find(|header| header.canonical && header.slot() == slot)
            .map(|header| header.root)
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn block_queries(&self) -> Vec<BlockFilter> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RpcCall::Blocks(filter) => Some(filter),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: RpcCall) {
        self.calls.lock().expect("calls lock poisoned").push(call);
        if self.stalled {
            std::future::pending::<()>().await;
        }
    }

    fn server_error(endpoint: &str) -> BeaconApiError {
        BeaconApiError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "internal error".to_string(),
        }
    }
}

#[async_trait]
impl BeaconNodeRpc for FakeBeaconNode {
    async fn chain_head(&self) -> Result<BlockHeaderData, BeaconApiError> {
        self.record(RpcCall::ChainHead).await;
        self.headers
            .iter()
            .filter(|header| header.canonical)
            .max_by_key(|header| header.slot())
            .cloned()
            .ok_or_else(|| BeaconApiError::NotFound("/eth/v1/beacon/headers/head".to_string()))
    }

    async fn genesis(&self) -> Result<Genesis, BeaconApiError> {
        self.record(RpcCall::Genesis).await;
        if self.fail_genesis {
            return Err(Self::server_error("/eth/v1/beacon/genesis"));
        }
        Ok(Genesis {
            genesis_time: self.genesis_time,
            genesis_validators_root: Self::GENESIS_VALIDATORS_ROOT,
            genesis_fork_version: B32::ZERO,
        })
    }

    async fn peers(&self) -> Result<Vec<PeerRecord>, BeaconApiError> {
        self.record(RpcCall::Peers).await;
        Ok(self.peers.clone())
    }

    async fn blocks(&self, filter: BlockFilter) -> Result<Vec<BlockHeaderData>, BeaconApiError> {
        self.record(RpcCall::Blocks(filter)).await;
        let headers = match filter {
            BlockFilter::Slot(slot) => self
                .headers
                .iter()
                .filter(|header| header.slot() == slot)
                .cloned()
                .collect(),
            BlockFilter::Root(_) if self.fail_root_queries => {
                return Err(Self::server_error("/eth/v1/beacon/headers/{block_id}"));
            }
            BlockFilter::Root(root) => self
                .headers
                .iter()
                .filter(|header| header.root == root)
                .cloned()
                .collect(),
        };
        Ok(headers)
    }
}
