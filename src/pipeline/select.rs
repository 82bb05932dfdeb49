//! Interactive fuzzy selector collaborator (fzf)

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::SelectorConfig;
use crate::error::{Result, SelectError};
use crate::process::CommandRunner;

use super::{Candidates, Select};

/// Pipes the candidates through an fzf-compatible filter
///
/// stderr is inherited since that is where fzf draws its interface; the
/// keyboard is read from the controlling terminal.
pub struct FzfSelector {
    program: String,
    preview: String,
    header: String,
    args: Vec<String>,
    runner: CommandRunner,
}

impl FzfSelector {
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self {
            program: config.program.clone(),
            preview: config.preview.clone(),
            header: config.header.clone(),
            args: config.args.clone(),
            runner: CommandRunner::new(),
        }
    }

    /// Full argument list handed to the selector
    pub fn command_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        if !self.preview.is_empty() {
            args.push("--preview".to_string());
            args.push(self.preview.clone());
        }
        if !self.header.is_empty() {
            args.push("--header".to_string());
            args.push(self.header.clone());
        }
        args
    }
}

#[async_trait]
impl Select for FzfSelector {
    #[instrument(skip_all, fields(program = %self.program))]
    async fn select(&self, candidates: &Candidates) -> Result<String> {
        let input = candidates.to_input();
        let args = self.command_args();
        let output = self
            .runner
            .run(&self.program, args.as_slice(), Some(input.as_bytes()))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    SelectError::NotInstalled {
                        program: self.program.clone(),
                    }
                } else {
                    SelectError::Spawn {
                        program: self.program.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        // fzf exits 130 on abort and 1 on no match, both with empty output
        if !output.status.success() {
            debug!("selector exited with {}", output.status);
        }

        Ok(output.stdout)
    }
}
