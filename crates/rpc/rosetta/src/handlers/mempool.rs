use actix_web::{HttpResponse, post};
use ream_api_types_rosetta::error::{Error, ErrorKind};

// POST /mempool
#[post("/mempool")]
pub async fn post_mempool() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /mempool/transaction
#[post("/mempool/transaction")]
pub async fn post_mempool_transaction() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}
