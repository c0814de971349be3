use actix_web::{
    HttpResponse, Responder, post,
    web::{Data, Json},
};
use ream_api_types_rosetta::{
    error::{Error, ErrorKind, all_errors},
    network::{Allow, Version},
    request::{MetadataRequest, NetworkRequest},
    response::{NetworkListResponse, NetworkOptionsResponse, NetworkStatusResponse},
};
use ream_network_spec::constants::{
    HISTORICAL_BALANCE_SUPPORTED, MIDDLEWARE_VERSION, NODE_VERSION, OPERATION_TYPES,
    ROSETTA_VERSION, operation_statuses,
};
use tokio_util::sync::CancellationToken;

use crate::{
    config::RosettaConfig,
    errors::client_error,
    handlers::{SharedClient, online_client},
};

/// Smallest timestamp a Rosetta client accepts: 2000-01-01T00:00:00Z, in milliseconds.
pub const MIN_UNIX_EPOCH_MILLIS: u64 = 946_713_600_000;

// POST /network/list
#[post("/network/list")]
pub async fn post_network_list(
    config: Data<RosettaConfig>,
    _request: Json<MetadataRequest>,
) -> Result<impl Responder, Error> {
    Ok(HttpResponse::Ok().json(NetworkListResponse {
        network_identifiers: vec![config.network.network_identifier()],
    }))
}

// POST /network/options
#[post("/network/options")]
pub async fn post_network_options(
    config: Data<RosettaConfig>,
    request: Json<NetworkRequest>,
) -> Result<impl Responder, Error> {
    config.check_network(&request.network_identifier)?;

    Ok(HttpResponse::Ok().json(NetworkOptionsResponse {
        version: Version {
            rosetta_version: ROSETTA_VERSION.to_string(),
            node_version: NODE_VERSION.to_string(),
            middleware_version: Some(MIDDLEWARE_VERSION.to_string()),
        },
        allow: Allow {
            operation_statuses: operation_statuses(),
            operation_types: OPERATION_TYPES.map(str::to_string).to_vec(),
            errors: all_errors(),
            historical_balance_lookup: HISTORICAL_BALANCE_SUPPORTED,
            call_methods: vec![],
        },
    }))
}

// POST /network/status
#[post("/network/status")]
pub async fn post_network_status(
    config: Data<RosettaConfig>,
    client: Data<SharedClient>,
    shutdown: Data<CancellationToken>,
    request: Json<NetworkRequest>,
) -> Result<impl Responder, Error> {
    config.check_network(&request.network_identifier)?;
    let client = online_client(&config, &client)?;

    let status = client
        .status(&shutdown.child_token())
        .await
        .map_err(client_error)?;

    if status.timestamp_millis < MIN_UNIX_EPOCH_MILLIS {
        return Err(ErrorKind::BeaconNotReady.error());
    }

    Ok(HttpResponse::Ok().json(NetworkStatusResponse {
        current_block_identifier: status.current_block,
        current_block_timestamp: status.timestamp_millis as i64,
        genesis_block_identifier: status.genesis_block,
        sync_status: status.sync_status,
        peers: status.peers,
    }))
}
