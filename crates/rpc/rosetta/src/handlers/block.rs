use actix_web::{
    HttpResponse, Responder, post,
    web::{Data, Json},
};
use ream_api_types_rosetta::{
    block::{Block, BlockMetadata},
    error::{Error, ErrorKind},
    request::{BlockRequest, BlockTransactionRequest},
    response::BlockResponse,
};
use ream_rosetta_client::resolver::{ParentIdentifier, ResolvedBlock};
use tokio_util::sync::CancellationToken;

use crate::{
    config::RosettaConfig,
    errors::client_error,
    handlers::{SharedClient, online_client},
};

// POST /block
#[post("/block")]
pub async fn post_block(
    config: Data<RosettaConfig>,
    client: Data<SharedClient>,
    shutdown: Data<CancellationToken>,
    request: Json<BlockRequest>,
) -> Result<impl Responder, Error> {
    config.check_network(&request.network_identifier)?;
    let client = online_client(&config, &client)?;

    let block = client
        .block(&shutdown.child_token(), &request.block_identifier)
        .await
        .map_err(client_error)?;

    Ok(HttpResponse::Ok().json(BlockResponse {
        block: rosetta_block(block)?,
    }))
}

// POST /block/transaction
#[post("/block/transaction")]
pub async fn post_block_transaction(
    _request: Json<BlockTransactionRequest>,
) -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

/// Rosetta requires a parent for every block, so the genesis block names itself.
fn rosetta_block(block: ResolvedBlock) -> Result<Block, Error> {
    let parent_block_identifier = match block.parent {
        ParentIdentifier::Genesis => block.identifier.clone(),
        ParentIdentifier::Resolved(parent) => parent,
        ParentIdentifier::Unresolved { parent_root } => {
            return Err(ErrorKind::ParentUnresolved.wrap(format!(
                "parent {parent_root} of block {} at slot {} is unknown to the beacon node",
                block.identifier.hash, block.identifier.index
            )));
        }
    };

    Ok(Block {
        block_identifier: block.identifier,
        parent_block_identifier,
        timestamp: block.timestamp_millis as i64,
        transactions: block.transactions,
        metadata: BlockMetadata { epoch: block.epoch },
    })
}
