//! tmux backend

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::PageTarget;
use crate::error::Result;
use crate::pipeline::{Launch, Page};
use crate::process::CommandRunner;

use super::{dir_arg, launch};

/// Opens pages as tmux windows in the current (or most recent) session,
/// or as new sessions the client is switched to
#[derive(Clone)]
pub struct TmuxLauncher {
    program: String,
    target: PageTarget,
    runner: CommandRunner,
}

impl TmuxLauncher {
    pub fn with_runner(program: String, target: PageTarget, runner: CommandRunner) -> Self {
        Self {
            program,
            target,
            runner,
        }
    }

    /// `new-window -n <label> -c <dir>`
    pub fn command_args(page: &Page) -> Vec<String> {
        vec![
            "new-window".to_string(),
            "-n".to_string(),
            page.label.clone(),
            "-c".to_string(),
            dir_arg(page),
        ]
    }

    /// `new-session -d -s <session> -n <label> -c <dir>`
    pub fn session_args(page: &Page) -> Vec<String> {
        vec![
            "new-session".to_string(),
            "-d".to_string(),
            "-s".to_string(),
            session_name(&page.label),
            "-n".to_string(),
            page.label.clone(),
            "-c".to_string(),
            dir_arg(page),
        ]
    }

    /// `switch-client -t <session>`
    pub fn switch_args(page: &Page) -> Vec<String> {
        vec![
            "switch-client".to_string(),
            "-t".to_string(),
            session_name(&page.label),
        ]
    }
}

/// tmux rejects `.` in session names
pub fn session_name(label: &str) -> String {
    label.chars().filter(|&c| c != '.').collect()
}

#[async_trait]
impl Launch for TmuxLauncher {
    #[instrument(skip(self))]
    async fn open_page(&self, page: &Page) -> Result<i32> {
        match self.target {
            PageTarget::Window => {
                launch(&self.runner, &self.program, &Self::command_args(page)).await
            }
            PageTarget::Session => {
                let code = launch(&self.runner, &self.program, &Self::session_args(page)).await?;
                if code != 0 {
                    debug!("session not created, not switching");
                    return Ok(code);
                }
                launch(&self.runner, &self.program, &Self::switch_args(page)).await
            }
        }
    }
}
