use std::{
    fmt,
    path::PathBuf,
    process::{ExitStatus, Stdio},
    time::Duration,
};

use nix::{
    errno::Errno,
    sys::signal::{Signal, kill},
    unistd::Pid,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::{Child, Command},
    task::JoinSet,
    time::timeout,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::SupervisorError;

/// How long output is still drained after the node exited. Descendants of the node can keep its
/// pipes open indefinitely.
const LOG_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogStream {
    Stdout,
    Stderr,
}

impl fmt::Display for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogStream::Stdout => write!(f, "beacon node"),
            LogStream::Stderr => write!(f, "beacon node err"),
        }
    }
}

enum TaskOutcome {
    LogsClosed,
    Interrupted,
    WatcherStopped,
    Exited(ExitStatus),
}

/// Runs a beacon node as a child process and forwards its output to the log.
#[derive(Debug, Clone)]
pub struct NodeSupervisor {
    binary: PathBuf,
    args: Vec<String>,
}

impl NodeSupervisor {
    pub fn new(binary: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            args,
        }
    }

    /// Like [`Self::run`], but an exit that `shutdown` did not ask for is an error.
    pub async fn supervise(
        &self,
        shutdown: CancellationToken,
    ) -> Result<ExitStatus, SupervisorError> {
        let status = self.run(shutdown.clone()).await?;
        if !shutdown.is_cancelled() {
            return Err(SupervisorError::ProcessExited(status));
        }
        Ok(status)
    }

    /// Starts the node and returns once it has exited.
    ///
    /// Cancelling `shutdown` sends the node SIGINT and keeps waiting for it to stop on its own.
    /// If any of the supervising tasks fails, the rest are aborted and the node is killed.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<ExitStatus, SupervisorError> {
        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SupervisorError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        let pid = child.id();
        let stdout = child
            .stdout
            .take()
            .ok_or(SupervisorError::MissingPipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(SupervisorError::MissingPipe("stderr"))?;
        info!(binary = ?self.binary, pid, "Started beacon node");

        let exited = CancellationToken::new();
        let mut tasks = JoinSet::new();
        tasks.spawn(forward_logs(stdout, LogStream::Stdout));
        tasks.spawn(forward_logs(stderr, LogStream::Stderr));
        tasks.spawn(watch_shutdown(pid, shutdown, exited.clone()));
        tasks.spawn(wait_for_exit(child, exited));

        // Returning early drops the set, which aborts the remaining tasks and with them the child.
        let mut exit_status = None;
        while exit_status.is_none() {
            let Some(joined) = tasks.join_next().await else {
                break;
            };
            if let TaskOutcome::Exited(status) = joined?? {
                exit_status = Some(status);
            }
        }
        let status = exit_status.ok_or(SupervisorError::StatusLost)?;
        info!(%status, "Beacon node exited");

        let drained = timeout(LOG_DRAIN_TIMEOUT, async {
            while let Some(joined) = tasks.join_next().await {
                joined??;
            }
            Ok::<_, SupervisorError>(())
        })
        .await;
        match drained {
            Ok(result) => result?,
            Err(_) => warn!("Beacon node output still open after exit, dropping it"),
        }

        Ok(status)
    }
}

/// Logs every line read from `reader`, replacing invalid UTF-8. Ends on end of output or the
/// first I/O error.
async fn forward_logs(
    reader: impl AsyncRead + Unpin,
    stream: LogStream,
) -> Result<TaskOutcome, SupervisorError> {
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => {
                debug!("Closing {stream} output: end of stream");
                break;
            }
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                info!("{stream}: {}", text.trim_end());
            }
            Err(err) => {
                warn!("Closing {stream} output: {err}");
                break;
            }
        }
    }
    Ok(TaskOutcome::LogsClosed)
}

/// Reaps the node and marks it `exited` before anything else can observe the status, so the pid
/// is never signalled after it may have been reused.
async fn wait_for_exit(
    mut child: Child,
    exited: CancellationToken,
) -> Result<TaskOutcome, SupervisorError> {
    let status = child.wait().await;
    exited.cancel();
    Ok(TaskOutcome::Exited(status.map_err(SupervisorError::Wait)?))
}

/// Interrupts the node once `shutdown` fires. Stops without signalling if the node exits first.
async fn watch_shutdown(
    pid: Option<u32>,
    shutdown: CancellationToken,
    exited: CancellationToken,
) -> Result<TaskOutcome, SupervisorError> {
    tokio::select! {
        _ = exited.cancelled() => return Ok(TaskOutcome::WatcherStopped),
        _ = shutdown.cancelled() => {}
    }

    // no pid means the child was already reaped
    let Some(pid) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return Ok(TaskOutcome::WatcherStopped);
    };

    info!(pid, "Sending interrupt to beacon node");
    match kill(Pid::from_raw(pid), Signal::SIGINT) {
        Ok(()) | Err(Errno::ESRCH) => Ok(TaskOutcome::Interrupted),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use tracing_test::traced_test;

    use super::*;

    fn shell(script: &str) -> NodeSupervisor {
        NodeSupervisor::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_returns_exit_status() {
        let status = shell("exit 7")
            .run(CancellationToken::new())
            .await
            .expect("Failed to supervise node");
        assert_eq!(status.code(), Some(7));
    }

    #[tokio::test]
    async fn test_unrequested_exit_is_an_error() {
        let result = shell("exit 0").supervise(CancellationToken::new()).await;
        match result {
            Err(SupervisorError::ProcessExited(status)) => assert!(status.success()),
            other => panic!("Expected ProcessExited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let result = NodeSupervisor::new("/nonexistent/beacon-node", vec![])
            .run(CancellationToken::new())
            .await;
        assert!(matches!(result, Err(SupervisorError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_and_waits_for_exit() {
        let supervisor = shell(r#"trap 'sleep 0.3; exit 3' INT; while true; do sleep 0.05; done"#);
        let shutdown = CancellationToken::new();

        let canceller = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let status = supervisor
            .supervise(shutdown)
            .await
            .expect("Failed to supervise node");

        // exit code comes from the trap, so the node handled the interrupt itself
        assert_eq!(status.code(), Some(3));
        assert!(started.elapsed() >= Duration::from_millis(600));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_forwards_both_streams() {
        let status = shell("echo 'slot 12 imported'; echo 'peer dropped' >&2")
            .run(CancellationToken::new())
            .await
            .expect("Failed to supervise node");

        assert!(status.success());
        assert!(logs_contain("beacon node: slot 12 imported"));
        assert!(logs_contain("beacon node err: peer dropped"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_invalid_utf8_output_keeps_node_alive() {
        let status = shell(r"printf 'bad \377 byte\n'; sleep 0.3; echo 'after bad line'; exit 0")
            .run(CancellationToken::new())
            .await
            .expect("Failed to supervise node");

        assert!(status.success());
        assert!(logs_contain("beacon node: bad"));
        assert!(logs_contain("beacon node: after bad line"));
    }

    #[tokio::test]
    async fn test_exit_is_marked_before_status_is_returned() {
        let child = Command::new("sh")
            .args(["-c", "exit 4"])
            .spawn()
            .expect("Failed to spawn shell");
        let exited = CancellationToken::new();

        let outcome = wait_for_exit(child, exited.clone())
            .await
            .expect("Failed to wait for shell");

        assert!(exited.is_cancelled());
        assert!(matches!(outcome, TaskOutcome::Exited(status) if status.code() == Some(4)));
    }

    #[tokio::test]
    async fn test_descendant_holding_output_does_not_block_exit() {
        let started = Instant::now();
        let status = shell("sleep 30 & exit 0")
            .run(CancellationToken::new())
            .await
            .expect("Failed to supervise node");

        assert!(status.success());
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
