use std::sync::Arc;

use crate::networks::{MAINNET, NetworkSpec, PYRMONT};

/// Parses the `--network` flag. `TESTNET` is accepted as an alias of Pyrmont.
pub fn network_parser(network_string: &str) -> Result<Arc<NetworkSpec>, String> {
    match network_string.to_ascii_lowercase().as_str() {
        "mainnet" => Ok(MAINNET.clone()),
        "pyrmont" | "testnet" => Ok(PYRMONT.clone()),
        _ => Err(format!("{network_string} is not a valid network")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::Network;

    #[test]
    fn test_network_parser() {
        assert_eq!(
            network_parser("MAINNET").map(|spec| spec.network),
            Ok(Network::Mainnet)
        );
        assert_eq!(
            network_parser("testnet").map(|spec| spec.network),
            Ok(Network::Pyrmont)
        );
        assert!(network_parser("ropsten").is_err());
    }

    #[test]
    fn test_network_identifier() {
        let identifier = PYRMONT.network_identifier();
        assert_eq!(identifier.blockchain, "Ethereum 2.0");
        assert_eq!(identifier.network, "Pyrmont");
    }
}
