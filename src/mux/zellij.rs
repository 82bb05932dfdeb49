//! zellij backend

use async_trait::async_trait;
use tracing::instrument;

use crate::error::Result;
use crate::pipeline::{Launch, Page};
use crate::process::CommandRunner;

use super::{dir_arg, launch};

/// Opens pages as tabs in the current zellij session
#[derive(Clone)]
pub struct ZellijLauncher {
    program: String,
    runner: CommandRunner,
}

impl ZellijLauncher {
    pub fn with_runner(program: String, runner: CommandRunner) -> Self {
        Self { program, runner }
    }

    /// `action new-tab --name <label> --cwd <dir>`
    pub fn command_args(page: &Page) -> Vec<String> {
        vec![
            "action".to_string(),
            "new-tab".to_string(),
            "--name".to_string(),
            page.label.clone(),
            "--cwd".to_string(),
            dir_arg(page),
        ]
    }
}

#[async_trait]
impl Launch for ZellijLauncher {
    #[instrument(skip(self))]
    async fn open_page(&self, page: &Page) -> Result<i32> {
        launch(&self.runner, &self.program, &Self::command_args(page)).await
    }
}
