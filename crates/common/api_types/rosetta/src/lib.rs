pub mod block;
pub mod error;
pub mod identifier;
pub mod network;
pub mod peer;
pub mod request;
pub mod response;
pub mod sync_status;
