pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod server;

#[cfg(test)]
mod test_utils;
