//! Error types for repo-tab
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for repo-tab
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Enumerate(#[from] EnumerateError),

    #[error("Selector error: {0}")]
    Select(#[from] SelectError),

    #[error("Launcher error: {0}")]
    Launch(#[from] LaunchError),

    #[error("Discovery error: {0}")]
    Discover(#[from] DiscoverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Candidate enumeration errors
#[derive(Error, Debug)]
pub enum EnumerateError {
    #[error("failed to run enumerator {program}: {reason}")]
    Spawn { program: PathBuf, reason: String },

    /// The enumerator ran but exited non-zero (`None` when killed by a signal)
    #[error("failed to list repositories ({program} exited with {})", describe_code(.code))]
    Failed { program: PathBuf, code: Option<i32> },
}

/// Interactive selector errors
#[derive(Error, Debug)]
pub enum SelectError {
    #[error("{program} is not installed or not in PATH")]
    NotInstalled { program: String },

    #[error("failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },
}

/// Multiplexer launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{program} is not installed or not in PATH")]
    NotInstalled { program: String },

    #[error("{command} failed to start: {reason}")]
    Spawn { command: String, reason: String },

    #[error("{command} timed out after {timeout:?}")]
    Timeout {
        command: String,
        timeout: std::time::Duration,
    },
}

/// Project discovery errors
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Cannot read {path}: {reason}")]
    ReadRoot { path: PathBuf, reason: String },

    #[error("Environment variable ${name} in '{path}': {reason}")]
    EnvVar {
        name: String,
        path: String,
        reason: String,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}
