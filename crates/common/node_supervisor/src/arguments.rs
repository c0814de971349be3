use std::path::PathBuf;

use url::Url;

/// Command line handed to the supervised beacon node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeArguments {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    /// Selects a non-default network, e.g. `--pyrmont`.
    pub network_flag: Option<String>,
    pub web3_provider: Url,
}

impl NodeArguments {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--config-file={}", self.config_file.display()),
            format!("--datadir={}", self.data_dir.display()),
        ];
        if let Some(flag) = &self.network_flag {
            args.push(flag.clone());
        }
        args.push(format!("--http-web3provider={}", self.web3_provider));
        args
    }
}
