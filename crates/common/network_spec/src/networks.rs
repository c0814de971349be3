use std::sync::{Arc, LazyLock};

use ream_api_types_rosetta::network::NetworkIdentifier;

/// Blockchain name reported in every network identifier.
pub const BLOCKCHAIN: &str = "Ethereum 2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Pyrmont,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkSpec {
    pub network: Network,

    /// Network name as advertised through the Rosetta API.
    pub network_name: &'static str,

    /// Flag selecting this network on the beacon node command line, if it isn't the default.
    pub node_flag: Option<&'static str>,
}

impl NetworkSpec {
    pub fn network_identifier(&self) -> NetworkIdentifier {
        NetworkIdentifier::new(BLOCKCHAIN, self.network_name)
    }
}

pub static MAINNET: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Mainnet,
        network_name: "Mainnet",
        node_flag: None,
    }
    .into()
});

pub static PYRMONT: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Pyrmont,
        network_name: "Pyrmont",
        node_flag: Some("--pyrmont"),
    }
    .into()
});
