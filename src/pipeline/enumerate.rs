//! External enumerator collaborator

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::{EnumerateError, Result};
use crate::process::CommandRunner;

use super::{Candidates, Enumerate};

/// Runs an enumerator binary and reads candidates from its stdout
///
/// The enumerator's stderr goes straight to the terminal so its own
/// diagnostics stay visible. No timeout: a slow walk just takes longer.
pub struct ExternalEnumerator {
    program: PathBuf,
    runner: CommandRunner,
}

impl ExternalEnumerator {
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            runner: CommandRunner::new(),
        }
    }
}

#[async_trait]
impl Enumerate for ExternalEnumerator {
    #[instrument(skip(self), fields(program = %self.program.display()))]
    async fn enumerate(&self, args: &[OsString]) -> Result<Candidates> {
        let output = self
            .runner
            .run(&self.program, args, None)
            .await
            .map_err(|e| EnumerateError::Spawn {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(EnumerateError::Failed {
                program: self.program.clone(),
                code: output.status.code(),
            }
            .into());
        }

        let candidates = Candidates::parse(&output.stdout);
        debug!("enumerator listed {} paths", candidates.len());
        Ok(candidates)
    }
}
