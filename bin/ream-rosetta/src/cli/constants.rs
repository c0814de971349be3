pub const DEFAULT_MODE: &str = "online";
pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_HTTP_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_HTTP_ALLOW_ORIGIN: bool = false;
/// REST API of the locally launched node.
pub const DEFAULT_BEACON_RPC: &str = "http://localhost:3500";
pub const DEFAULT_WEB3_PROVIDER: &str = "http://localhost:8545";
pub const DEFAULT_NODE_BINARY: &str = "/app/beacon-chain";
pub const DEFAULT_NODE_CONFIG_FILE: &str = "/app/ethereum/prysm-config.yaml";
pub const DEFAULT_DATA_DIR: &str = "/data";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "120";
