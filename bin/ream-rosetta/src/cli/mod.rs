pub mod constants;
pub mod run;

use clap::{Parser, Subcommand};

use crate::cli::run::RunConfig;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level, from 1 (errors only) to 5 (trace)
    #[arg(short, long, global = true, default_value_t = 3)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Rosetta API server
    #[command(name = "run")]
    Run(Box<RunConfig>),
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 | 1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}
