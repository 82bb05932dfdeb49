//! repo-tab - pick a repository with fzf and open it in a new tmux window
//!
//! Every argument is forwarded untouched to the enumerator (`repo-list`).
//! There are no flags of our own, so the raw argument list is passed on as
//! is: `--`, `--help` and non UTF-8 values included.

use std::ffi::OsString;
use std::process::ExitCode;

use color_eyre::eyre::Result;
use tracing::info;

use repo_tab::{APP_NAME, Config, Error, Outcome, Pipeline, VERSION, logging::setup_logging};

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    setup_logging(config.debug, config.log_file.as_deref())?;
    info!("Starting {} v{}", APP_NAME, VERSION);

    let pipeline = Pipeline::from_config(&config)?;

    match pipeline.run(&args).await {
        Ok(outcome) => {
            if let Outcome::Launched { ref page, code } = outcome {
                info!("Launcher for '{}' exited with {}", page.label, code);
            }
            Ok(exit_code(outcome.exit_code()))
        }
        Err(Error::Enumerate(e)) => {
            eprintln!("error: {}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
