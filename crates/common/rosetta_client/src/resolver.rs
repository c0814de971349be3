use alloy_primitives::{B256, hex};
use ream_api_types_rosetta::{
    block::Transaction,
    identifier::{BlockIdentifier, PartialBlockIdentifier},
};
use ream_beacon_api_client::{
    rpc::BeaconNodeRpc,
    types::{BlockFilter, BlockHeaderData},
};
use ream_consensus_misc::{
    constants::beacon::GENESIS_SLOT,
    misc::{compute_epoch_at_slot, compute_timestamp_at_slot},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{client::cancellable, errors::BeaconClientError};

/// A validated block lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockQuery {
    Hash(String),
    Index(u64),
}

impl TryFrom<&PartialBlockIdentifier> for BlockQuery {
    type Error = BeaconClientError;

    /// When both fields are set the hash wins and the index is ignored.
    fn try_from(identifier: &PartialBlockIdentifier) -> Result<Self, Self::Error> {
        match (&identifier.hash, identifier.index) {
            (Some(hash), _) => Ok(BlockQuery::Hash(hash.clone())),
            (None, Some(index)) => Ok(BlockQuery::Index(index)),
            (None, None) => Err(BeaconClientError::InvalidQuery),
        }
    }
}

/// Decodes a block root given as hex, with or without a `0x` prefix.
pub fn decode_root(hash: &str) -> Result<B256, BeaconClientError> {
    let malformed = |reason: String| BeaconClientError::MalformedInput {
        hash: hash.to_string(),
        reason,
    };

    let stripped = hash.strip_prefix("0x").unwrap_or(hash);
    let bytes = hex::decode(stripped).map_err(|err| malformed(err.to_string()))?;
    B256::try_from(bytes.as_slice())
        .map_err(|_| malformed(format!("expected 32 bytes, got {}", bytes.len())))
}

/// How a resolved block links to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentIdentifier {
    /// The block is at the genesis slot and has no parent.
    Genesis,
    Resolved(BlockIdentifier),
    /// The node returned no block for the parent root, e.g. because it has been pruned or has not
    /// been imported yet.
    Unresolved { parent_root: B256 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBlock {
    pub identifier: BlockIdentifier,
    pub parent: ParentIdentifier,
    pub timestamp_millis: u64,
    pub epoch: u64,
    pub transactions: Vec<Transaction>,
}

/// Resolves block queries against a beacon node, one request at a time.
pub struct BlockResolver<'a, R> {
    rpc: &'a R,
    token: &'a CancellationToken,
}

impl<'a, R: BeaconNodeRpc> BlockResolver<'a, R> {
    pub fn new(rpc: &'a R, token: &'a CancellationToken) -> Self {
        Self { rpc, token }
    }

    pub async fn resolve(
        &self,
        query: &BlockQuery,
        genesis_time: u64,
    ) -> Result<ResolvedBlock, BeaconClientError> {
        let header = match query {
            BlockQuery::Hash(hash) => self.resolve_by_hash(hash).await?,
            BlockQuery::Index(index) => self.resolve_by_index(*index).await?,
        };
        let parent = self.resolve_parent(&header).await?;
        let slot = header.slot();

        Ok(ResolvedBlock {
            identifier: BlockIdentifier::new(slot, header.root.to_string()),
            parent,
            timestamp_millis: compute_timestamp_at_slot(genesis_time, slot) * 1000,
            epoch: compute_epoch_at_slot(slot),
            transactions: vec![],
        })
    }

    /// Looks up the block proposed at `slot`, preferring the canonical one if the node knows of
    /// several.
    pub async fn resolve_by_index(&self, slot: u64) -> Result<BlockHeaderData, BeaconClientError> {
        let filter = BlockFilter::Slot(slot);
        let mut headers = self.fetch(filter).await?;
        if headers.is_empty() {
            return Err(BeaconClientError::NotFound(filter));
        }

        let position = headers
            .iter()
            .position(|header| header.canonical)
            .unwrap_or_default();
        Ok(headers.swap_remove(position))
    }

    pub async fn resolve_by_hash(&self, hash: &str) -> Result<BlockHeaderData, BeaconClientError> {
        self.resolve_by_root(decode_root(hash)?).await
    }

    pub async fn resolve_by_root(&self, root: B256) -> Result<BlockHeaderData, BeaconClientError> {
        let filter = BlockFilter::Root(root);
        self.fetch(filter)
            .await?
            .into_iter()
            .next()
            .ok_or(BeaconClientError::NotFound(filter))
    }

    async fn resolve_parent(
        &self,
        header: &BlockHeaderData,
    ) -> Result<ParentIdentifier, BeaconClientError> {
        if header.slot() == GENESIS_SLOT {
            return Ok(ParentIdentifier::Genesis);
        }

        let parent_root = header.parent_root();
        match self.resolve_by_root(parent_root).await {
            Ok(parent) => Ok(ParentIdentifier::Resolved(BlockIdentifier::new(
                parent.slot(),
                parent.root.to_string(),
            ))),
            Err(BeaconClientError::NotFound(_)) => {
                warn!(slot = header.slot(), ?parent_root, "Parent block not known to beacon node");
                Ok(ParentIdentifier::Unresolved { parent_root })
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch(&self, filter: BlockFilter) -> Result<Vec<BlockHeaderData>, BeaconClientError> {
        debug!(%filter, "Resolving block");
        cancellable(self.token, self.rpc.blocks(filter)).await
    }
}
