pub mod errors;
pub mod http_client;
pub mod rpc;
pub mod types;

pub use reqwest::StatusCode;
