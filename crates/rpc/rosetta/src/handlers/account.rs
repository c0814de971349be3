use actix_web::{HttpResponse, post};
use ream_api_types_rosetta::error::{Error, ErrorKind};

// POST /account/balance
#[post("/account/balance")]
pub async fn post_account_balance() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}

// POST /account/coins
#[post("/account/coins")]
pub async fn post_account_coins() -> Result<HttpResponse, Error> {
    Err(ErrorKind::Unimplemented.error())
}
