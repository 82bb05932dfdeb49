//! tracing subscriber setup shared by both binaries
//!
//! stdout carries data (candidate lists), so logs go to stderr or a file.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber
///
/// `debug` lowers the filter to `debug`; otherwise only warnings show.
/// `RUST_LOG` wins over both when set.
pub fn setup_logging(debug: bool, log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    if let Some(path) = log_file {
        // the selector owns the terminal, so file logging keeps the screen clean
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_ansi(false).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}
