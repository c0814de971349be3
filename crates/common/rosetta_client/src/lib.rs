pub mod client;
pub mod errors;
pub mod resolver;
pub mod sync_status;

#[cfg(test)]
mod test_utils;
