//! repo-tab - fuzzy-pick a repository and open it in a new multiplexer page
//!
//! The `repo-tab` binary chains three external programs:
//! an enumerator listing candidate directories, an interactive selector
//! (fzf), and a terminal multiplexer (tmux or zellij) that opens the pick.
//! The `repo-list` binary is the default enumerator.
//!
//! # Modules
//!
//! - [`pipeline`] - Enumerate → select → launch glue and label derivation
//! - [`mux`] - tmux and zellij launchers
//! - [`discover`] - Marker-based project discovery behind `repo-list`
//! - [`process`] - Child process runner
//! - [`config`] - Layered configuration
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - Error types

pub mod config;
pub mod discover;
pub mod error;
pub mod logging;
pub mod mux;
pub mod pipeline;
pub mod process;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Outcome, Page, Pipeline};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
