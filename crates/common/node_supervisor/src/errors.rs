use std::{io, path::PathBuf, process::ExitStatus};

use nix::errno::Errno;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Unable to start beacon node {binary:?}: {source}")]
    Spawn {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Beacon node {0} was not captured")]
    MissingPipe(&'static str),

    #[error("Failed waiting for beacon node: {0}")]
    Wait(#[source] io::Error),

    #[error("Failed to interrupt beacon node: {0}")]
    Signal(#[from] Errno),

    #[error("Supervisor task failed: {0}")]
    Join(#[from] JoinError),

    #[error("Beacon node exited without its exit status being observed")]
    StatusLost,

    #[error("Beacon node exited unexpectedly with {0}")]
    ProcessExited(ExitStatus),
}
