use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use ream_api_types_rosetta::{
    identifier::{BlockIdentifier, PartialBlockIdentifier},
    peer::Peer,
    sync_status::SyncStatus,
};
use ream_beacon_api_client::{
    errors::BeaconApiError,
    rpc::{BeaconApiClient, BeaconNodeRpc},
    types::PeerRecord,
};
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use crate::{
    errors::BeaconClientError,
    resolver::{BlockQuery, BlockResolver, ResolvedBlock},
    sync_status::{classify, estimate_target_slot},
};

/// Snapshot of the node returned by a status query.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStatus {
    pub current_block: BlockIdentifier,
    /// Wall-clock time of the query in milliseconds since the unix epoch.
    pub timestamp_millis: u64,
    pub genesis_block: BlockIdentifier,
    pub sync_status: SyncStatus,
    pub peers: Vec<Peer>,
}

/// The operations the Rosetta API serves from a beacon node.
#[async_trait]
pub trait BlockchainClient: Send + Sync {
    async fn status(&self, token: &CancellationToken) -> Result<NodeStatus, BeaconClientError>;

    async fn block(
        &self,
        token: &CancellationToken,
        identifier: &PartialBlockIdentifier,
    ) -> Result<ResolvedBlock, BeaconClientError>;
}

/// Translates Rosetta queries into beacon node RPCs.
///
/// Holds no state besides the RPC channel, so concurrent calls are independent of each other.
#[derive(Debug)]
pub struct RosettaClient<R = BeaconApiClient> {
    rpc: R,
}

impl RosettaClient<BeaconApiClient> {
    /// Sets up the channel to the beacon node at `endpoint`.
    ///
    /// No request is sent here: a locally supervised node may still be starting up, so
    /// reachability only shows on the first query.
    pub fn connect(endpoint: Url, request_timeout: Duration) -> Result<Self, BeaconClientError> {
        let rpc = BeaconApiClient::new(endpoint.clone(), request_timeout)
            .map_err(BeaconClientError::Connection)?;
        info!(%endpoint, "Connected to beacon node");
        Ok(Self { rpc })
    }
}

impl<R: BeaconNodeRpc> RosettaClient<R> {
    pub fn with_rpc(rpc: R) -> Self {
        Self { rpc }
    }

    /// Releases the channel. Taking `self` makes a second close impossible.
    pub fn close(self) {
        info!("Closing beacon node connection");
        drop(self.rpc);
    }

    /// Queries chain head, genesis and peers in that order. Any failure fails the whole call.
    pub async fn status_at(
        &self,
        token: &CancellationToken,
        now: SystemTime,
    ) -> Result<NodeStatus, BeaconClientError> {
        let head = cancellable(token, self.rpc.chain_head()).await?;
        let genesis = cancellable(token, self.rpc.genesis()).await?;
        let peers = self.peers(token).await?;

        let now = now.duration_since(UNIX_EPOCH).unwrap_or_default();
        let target_slot = estimate_target_slot(genesis.genesis_time, now.as_secs());
        let sync_status = classify(head.slot(), target_slot);
        debug!(current_slot = head.slot(), target_slot, stage = %sync_status.stage, "Computed sync status");

        Ok(NodeStatus {
            current_block: BlockIdentifier::new(head.slot(), head.root.to_string()),
            timestamp_millis: now.as_millis() as u64,
            genesis_block: BlockIdentifier::new(0, genesis.genesis_validators_root.to_string()),
            sync_status,
            peers,
        })
    }

    pub async fn peers(&self, token: &CancellationToken) -> Result<Vec<Peer>, BeaconClientError> {
        let records = cancellable(token, self.rpc.peers()).await?;
        Ok(records.into_iter().map(peer_from_record).collect())
    }

    pub async fn resolve_block(
        &self,
        token: &CancellationToken,
        identifier: &PartialBlockIdentifier,
    ) -> Result<ResolvedBlock, BeaconClientError> {
        let query = BlockQuery::try_from(identifier)?;
        let genesis = cancellable(token, self.rpc.genesis()).await?;
        BlockResolver::new(&self.rpc, token)
            .resolve(&query, genesis.genesis_time)
            .await
    }
}

#[async_trait]
impl<R: BeaconNodeRpc> BlockchainClient for RosettaClient<R> {
    async fn status(&self, token: &CancellationToken) -> Result<NodeStatus, BeaconClientError> {
        self.status_at(token, SystemTime::now()).await
    }

    async fn block(
        &self,
        token: &CancellationToken,
        identifier: &PartialBlockIdentifier,
    ) -> Result<ResolvedBlock, BeaconClientError> {
        self.resolve_block(token, identifier).await
    }
}

/// Runs an RPC unless `token` fires first.
pub(crate) async fn cancellable<T>(
    token: &CancellationToken,
    request: impl Future<Output = Result<T, BeaconApiError>>,
) -> Result<T, BeaconClientError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(BeaconClientError::Cancelled),
        result = request => Ok(result?),
    }
}

fn peer_from_record(record: PeerRecord) -> Peer {
    let mut metadata = Map::new();
    metadata.insert(
        "address".to_string(),
        Value::String(record.last_seen_p2p_address),
    );
    metadata.insert("direction".to_string(), Value::String(record.direction));
    metadata.insert("connection_state".to_string(), Value::String(record.state));
    if let Some(enr) = record.enr {
        metadata.insert("enr".to_string(), Value::String(enr));
    }

    Peer {
        peer_id: record.peer_id,
        metadata,
    }
}
