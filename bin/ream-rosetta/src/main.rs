use std::{env, process, sync::Arc};

use anyhow::Context;
use clap::Parser;
use ream_node_supervisor::{errors::SupervisorError, supervisor::NodeSupervisor};
use ream_rosetta::{
    cli::{Cli, Commands, run::RunConfig},
    startup_message::startup_message,
};
use ream_rosetta_client::client::{BlockchainClient, RosettaClient};
use ream_rpc_rosetta::{handlers::SharedClient, server};
use tokio::{
    runtime::Runtime,
    signal::unix::{SignalKind, signal},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Entry point for the Rosetta server. Initializes logging, parses CLI arguments and serves the
/// Rosetta API until Ctrl-C or SIGTERM, or until the supervised beacon node stops on its own.
fn main() {
    let cli = Cli::parse();

    // Set the default log level based on verbosity flag or RUST_LOG env var
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let env_filter = match rust_log.is_empty() {
        true => EnvFilter::builder().parse_lossy(cli.log_directive()),
        false => EnvFilter::builder().parse_lossy(rust_log),
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    info!("\n{}", startup_message());

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!("Unable to create runtime: {err}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run(config) => runtime.block_on(run(*config)),
    };

    if let Err(err) = result {
        error!("{err:#}");
        process::exit(1);
    }
    process::exit(0);
}

/// Runs the Rosetta server, and in online mode without a remote node, the beacon node behind it.
///
/// All tasks share one cancellation token: a shutdown signal, a failing server or a node that
/// stopped on its own cancels it, and every task then winds down.
pub async fn run(config: RunConfig) -> anyhow::Result<()> {
    info!(mode = %config.mode, network = config.network.network_name, "starting up rosetta server...");

    let client = match config.beacon_endpoint()? {
        Some(endpoint) => Some(Arc::new(
            RosettaClient::connect(endpoint, config.request_timeout)
                .context("Unable to connect to beacon node")?,
        )),
        None => None,
    };

    let shutdown = CancellationToken::new();
    let _signals = AbortOnDrop(tokio::spawn(cancel_on_signal(shutdown.clone())));

    let mut node = config.supervises_node().then(|| {
        let supervisor = NodeSupervisor::new(&config.node_binary, config.node_arguments().to_args());
        let shutdown = shutdown.clone();
        AbortOnDrop(tokio::spawn(async move {
            let result = supervisor.supervise(shutdown.clone()).await;
            if let Err(err) = &result {
                error!("Beacon node failed: {err}");
                shutdown.cancel();
            }
            result
        }))
    });

    let shared_client: SharedClient = client
        .clone()
        .map(|client| client as Arc<dyn BlockchainClient>);
    let server_result = server::start(
        config.server_config(),
        config.rosetta_config(),
        shared_client,
        shutdown.clone(),
    )
    .await;
    if let Err(err) = &server_result {
        error!("Rosetta API server failed: {err}");
    }
    shutdown.cancel();

    let node_result = match node.as_mut() {
        Some(handle) => Some((&mut handle.0).await),
        None => None,
    };

    if let Some(client) = client {
        match Arc::try_unwrap(client) {
            Ok(client) => client.close(),
            Err(_) => warn!("Beacon node connection still in use at shutdown"),
        }
    }

    server_result.context("Rosetta API server failed")?;
    if let Some(result) = node_result {
        match result.context("Beacon node supervisor panicked")? {
            Ok(status) => info!("Beacon node stopped: {status}"),
            Err(err @ SupervisorError::ProcessExited(_)) => {
                return Err(err).context("Beacon node halted");
            }
            Err(err) => return Err(err).context("Unable to supervise beacon node"),
        }
    }

    info!("rosetta server stopped");
    Ok(())
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(err) => {
            error!("Unable to listen for SIGTERM: {err}");
            shutdown.cancel();
            return;
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Ctrl-C received, shutting down..."),
            Err(err) => error!("Unable to listen for Ctrl-C: {err}"),
        },
        _ = terminate.recv() => {
            info!("SIGTERM received, shutting down...");
        }
        _ = shutdown.cancelled() => return,
    }

    shutdown.cancel();
}
