use std::{net::IpAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, bail};
use clap::Parser;
use ream_network_spec::{cli::network_parser, networks::NetworkSpec};
use ream_node_supervisor::arguments::NodeArguments;
use ream_rpc_rosetta::config::{Mode, RosettaConfig, RpcServerConfig};
use url::Url;

use crate::cli::constants::{
    DEFAULT_BEACON_RPC, DEFAULT_DATA_DIR, DEFAULT_HTTP_ADDRESS, DEFAULT_HTTP_ALLOW_ORIGIN,
    DEFAULT_HTTP_PORT, DEFAULT_MODE, DEFAULT_NETWORK, DEFAULT_NODE_BINARY,
    DEFAULT_NODE_CONFIG_FILE, DEFAULT_REQUEST_TIMEOUT, DEFAULT_WEB3_PROVIDER,
};

#[derive(Debug, Parser)]
pub struct RunConfig {
    #[arg(long, env = "MODE", help = "Choose online or offline", default_value = DEFAULT_MODE)]
    pub mode: Mode,

    #[arg(
        long,
        env = "NETWORK",
        help = "Choose mainnet or pyrmont (alias testnet)",
        default_value = DEFAULT_NETWORK,
        value_parser = network_parser
    )]
    pub network: Arc<NetworkSpec>,

    /// HTTP port number
    #[arg(long, env = "PORT", default_value_t = DEFAULT_HTTP_PORT)]
    pub port: u16,

    /// HTTP bind address
    #[arg(long, default_value = DEFAULT_HTTP_ADDRESS)]
    pub http_address: IpAddr,

    /// Allow CORS
    #[arg(long, default_value_t = DEFAULT_HTTP_ALLOW_ORIGIN)]
    pub http_allow_origin: bool,

    #[arg(
        long,
        env = "BEACON_RPC",
        help = "HTTP url of the beacon node API. Defaults to the locally launched node, required with --remote-beacon"
    )]
    pub beacon_rpc: Option<Url>,

    #[arg(
        long,
        env = "REMOTE_BEACON",
        help = "Use an already running beacon node instead of launching one"
    )]
    pub remote_beacon: bool,

    #[arg(
        long,
        env = "WEB3PROVIDER",
        help = "HTTP url of a synced execution node the launched beacon node follows",
        default_value = DEFAULT_WEB3_PROVIDER
    )]
    pub web3_provider: Url,

    /// Beacon node executable launched when not using a remote node
    #[arg(long, default_value = DEFAULT_NODE_BINARY)]
    pub node_binary: PathBuf,

    /// Configuration file passed to the launched beacon node
    #[arg(long, default_value = DEFAULT_NODE_CONFIG_FILE)]
    pub node_config_file: PathBuf,

    /// Data directory of the launched beacon node
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[arg(long, help = "Timeout in seconds for beacon node requests", default_value = DEFAULT_REQUEST_TIMEOUT, value_parser = duration_parser)]
    pub request_timeout: Duration,
}

impl RunConfig {
    pub fn rosetta_config(&self) -> RosettaConfig {
        RosettaConfig::new(self.mode, self.network.clone())
    }

    pub fn server_config(&self) -> RpcServerConfig {
        RpcServerConfig::new(self.http_address, self.port, self.http_allow_origin)
    }

    /// Whether a beacon node has to be launched and supervised.
    pub fn supervises_node(&self) -> bool {
        self.mode == Mode::Online && !self.remote_beacon
    }

    /// The beacon node API to query, `None` when offline.
    pub fn beacon_endpoint(&self) -> anyhow::Result<Option<Url>> {
        if self.mode == Mode::Offline {
            return Ok(None);
        }
        match (&self.beacon_rpc, self.remote_beacon) {
            (Some(endpoint), _) => Ok(Some(endpoint.clone())),
            (None, true) => bail!("--beacon-rpc must be set when using a remote beacon node"),
            (None, false) => Url::parse(DEFAULT_BEACON_RPC)
                .map(Some)
                .context("Invalid default beacon node url"),
        }
    }

    pub fn node_arguments(&self) -> NodeArguments {
        NodeArguments {
            config_file: self.node_config_file.clone(),
            data_dir: self.data_dir.clone(),
            network_flag: self.network.node_flag.map(str::to_string),
            web3_provider: self.web3_provider.clone(),
        }
    }
}

pub fn duration_parser(s: &str) -> Result<Duration, String> {
    Ok(Duration::from_secs(s.parse().map_err(|err| {
        format!("Could not parse the request timeout: {err:?}")
    })?))
}
