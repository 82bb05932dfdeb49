//! Async command runner for the external collaborators
//!
//! Wraps `tokio::process::Command` with:
//! - Optional stdin payload
//! - Captured stdout, stderr passed through to the terminal
//! - Optional timeout

use std::ffi::OsStr;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// Output of a finished child process
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
}

/// Why a command produced no `Captured` output
#[derive(Error, Debug)]
pub enum RunError {
    /// The program could not be started or waited on
    #[error("{0}")]
    Io(std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl RunError {
    /// Whether the program itself was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, RunError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Single-shot command runner
///
/// Every call spawns exactly one child and waits for it; nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    /// Command timeout (`None` waits forever)
    timeout: Option<Duration>,
}

impl CommandRunner {
    /// Create a runner without timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run `program args...`, optionally feeding `input` on stdin
    #[instrument(skip_all, fields(program = %program.as_ref().to_string_lossy()))]
    pub async fn run<S: AsRef<OsStr>>(
        &self,
        program: impl AsRef<OsStr>,
        args: &[S],
        input: Option<&[u8]>,
    ) -> std::result::Result<Captured, RunError> {
        let mut cmd = Command::new(program.as_ref());
        cmd.args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            // diagnostics (and fzf's interface) go straight to the terminal
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(RunError::Io)?;

        if let Some(input) = input {
            if let Some(mut stdin) = child.stdin.take() {
                // A child that exits without reading its input closes the pipe early
                if let Err(e) = stdin.write_all(input).await {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(RunError::Io(e));
                    }
                    debug!("child closed stdin before reading all input");
                }
                // dropping stdin sends EOF
            }
        }

        let output = match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(result) => result.map_err(RunError::Io)?,
                Err(_) => {
                    warn!("command timed out after {:?}", limit);
                    return Err(RunError::Timeout(limit));
                }
            },
            None => child.wait_with_output().await.map_err(RunError::Io)?,
        };

        debug!("exited with {}", output.status);

        Ok(Captured {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}
