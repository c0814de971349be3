use std::{
    fmt,
    net::{IpAddr, SocketAddr},
    str::FromStr,
    sync::Arc,
};

use ream_api_types_rosetta::{
    error::{Error, ErrorKind},
    network::NetworkIdentifier,
};
use ream_network_spec::networks::NetworkSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcServerConfig {
    pub http_socket_address: SocketAddr,
    pub http_allow_origin: bool,
}

impl RpcServerConfig {
    pub fn new(http_address: IpAddr, http_port: u16, http_allow_origin: bool) -> Self {
        Self {
            http_socket_address: SocketAddr::new(http_address, http_port),
            http_allow_origin,
        }
    }
}

/// Whether the server may reach a beacon node. Offline servers only answer requests that need no
/// chain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Offline,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode.to_ascii_lowercase().as_str() {
            "online" => Ok(Mode::Online),
            "offline" => Ok(Mode::Offline),
            _ => Err(format!("{mode} is not a valid mode")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Online => write!(f, "ONLINE"),
            Mode::Offline => write!(f, "OFFLINE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RosettaConfig {
    pub mode: Mode,
    pub network: Arc<NetworkSpec>,
}

impl RosettaConfig {
    pub fn new(mode: Mode, network: Arc<NetworkSpec>) -> Self {
        Self { mode, network }
    }

    /// Rejects requests addressed to any network but the one being served.
    pub fn check_network(&self, network_identifier: &NetworkIdentifier) -> Result<(), Error> {
        let expected = self.network.network_identifier();
        if *network_identifier != expected {
            return Err(ErrorKind::InvalidNetwork.wrap(format!(
                "expected {}/{}, got {}/{}",
                expected.blockchain,
                expected.network,
                network_identifier.blockchain,
                network_identifier.network
            )));
        }
        Ok(())
    }

    pub fn ensure_online(&self) -> Result<(), Error> {
        match self.mode {
            Mode::Online => Ok(()),
            Mode::Offline => Err(ErrorKind::UnavailableOffline.error()),
        }
    }
}
