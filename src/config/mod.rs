//! Configuration module
//!
//! Handles:
//! - User configuration (`~/.config/repo-tab/config.toml`)
//! - Environment overrides (`REPO_TAB_*`)
//! - `$VAR` expansion in configured paths

mod settings;
mod vars;

pub use settings::*;
pub use vars::*;
