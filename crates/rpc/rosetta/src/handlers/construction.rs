//! The chain has no transfers to construct, so every construction endpoint is a stub.

use actix_web::{HttpResponse, post};
use ream_api_types_rosetta::error::{Error, ErrorKind};

// POST /construction/derive
#[post("/construction/derive")]
pub async fn post_construction_derive() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/preprocess
#[post("/construction/preprocess")]
pub async fn post_construction_preprocess() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/metadata
#[post("/construction/metadata")]
pub async fn post_construction_metadata() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/payloads
#[post("/construction/payloads")]
pub async fn post_construction_payloads() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/combine
#[post("/construction/combine")]
pub async fn post_construction_combine() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/parse
#[post("/construction/parse")]
pub async fn post_construction_parse() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/hash
#[post("/construction/hash")]
pub async fn post_construction_hash() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /construction/submit
#[post("/construction/submit")]
pub async fn post_construction_submit() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}
