//! Terminal multiplexer launchers
//!
//! Each backend turns a [`Page`] into multiplexer commands:
//! - `TmuxLauncher` - `tmux new-window`, or `tmux new-session` + `switch-client`
//! - `ZellijLauncher` - `zellij action new-tab`

mod tmux;
mod zellij;

pub use tmux::*;
pub use zellij::*;

use std::time::Duration;

use tracing::warn;

use crate::config::{Backend, LauncherConfig};
use crate::error::{LaunchError, Result};
use crate::pipeline::{Launch, Page};
use crate::process::{CommandRunner, RunError};

/// Build the launcher selected by `config`
pub fn launcher_for(config: &LauncherConfig) -> Box<dyn Launch> {
    let program = config.program();
    let runner = runner_for(config.timeout_ms);
    match config.backend {
        Backend::Tmux => Box::new(TmuxLauncher::with_runner(program, config.page, runner)),
        Backend::Zellij => Box::new(ZellijLauncher::with_runner(program, runner)),
    }
}

fn runner_for(timeout_ms: u64) -> CommandRunner {
    let runner = CommandRunner::new();
    if timeout_ms == 0 {
        runner
    } else {
        runner.with_timeout(Duration::from_millis(timeout_ms))
    }
}

/// Run one launcher command and hand back its exit code
///
/// A non-zero exit is not an error here: the caller exits with the same code.
async fn launch(runner: &CommandRunner, program: &str, args: &[String]) -> Result<i32> {
    let command = format!("{} {}", program, args.join(" "));
    let output = runner.run(program, args, None).await.map_err(|e| match e {
        RunError::Timeout(timeout) => LaunchError::Timeout {
            command: command.clone(),
            timeout,
        },
        e if e.is_not_found() => LaunchError::NotInstalled {
            program: program.to_string(),
        },
        e => LaunchError::Spawn {
            command: command.clone(),
            reason: e.to_string(),
        },
    })?;

    if output.status.success() {
        Ok(0)
    } else {
        warn!("{} exited with {}", command, output.status);
        // killed by a signal: report a plain failure
        Ok(output.status.code().unwrap_or(1))
    }
}

/// Path argument for a page's working directory
fn dir_arg(page: &Page) -> String {
    page.dir.to_string_lossy().into_owned()
}
