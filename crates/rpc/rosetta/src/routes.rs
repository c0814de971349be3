use actix_web::web::ServiceConfig;

use crate::handlers::{
    account::{post_account_balance, post_account_coins},
    block::{post_block, post_block_transaction},
    construction::{
        post_construction_combine, post_construction_derive, post_construction_hash,
        post_construction_metadata, post_construction_parse, post_construction_payloads,
        post_construction_preprocess, post_construction_submit,
    },
    mempool::{post_mempool, post_mempool_transaction},
    network::{post_network_list, post_network_options, post_network_status},
};

pub fn register_network_routes(config: &mut ServiceConfig) {
    config
        .service(post_network_list)
        .service(post_network_options)
        .service(post_network_status);
}

pub fn register_block_routes(config: &mut ServiceConfig) {
    config
        .service(post_block)
        .service(post_block_transaction);
}

pub fn register_account_routes(config: &mut ServiceConfig) {
    config
        .service(post_account_balance)
        .service(post_account_coins);
}

pub fn register_construction_routes(config: &mut ServiceConfig) {
    config
        .service(post_construction_derive)
        .service(post_construction_preprocess)
        .service(post_construction_metadata)
        .service(post_construction_payloads)
        .service(post_construction_combine)
        .service(post_construction_parse)
        .service(post_construction_hash)
        .service(post_construction_submit);
}

pub fn register_mempool_routes(config: &mut ServiceConfig) {
    config
        .service(post_mempool)
        .service(post_mempool_transaction);
}

/// Registers every Rosetta endpoint.
pub fn register_routers(config: &mut ServiceConfig) {
    config
        .configure(register_network_routes)
        .configure(register_block_routes)
        .configure(register_account_routes)
        .configure(register_construction_routes)
        .configure(register_mempool_routes);
}
