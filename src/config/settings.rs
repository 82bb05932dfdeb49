//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

use super::expand;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "REPO_TAB_CONFIG";

/// Prefix for environment overrides (`REPO_TAB_SELECTOR__PROGRAM`, ...)
pub const ENV_PREFIX: &str = "REPO_TAB_";

/// Name of the enumerator binary installed alongside `repo-tab`
pub const DEFAULT_ENUMERATOR: &str = "repo-list";

const IGNORE_DEFAULT: [&str; 11] = [
    "node_modules",
    "venv",
    "bin",
    "target",
    "debug",
    "src",
    "test",
    "tests",
    "lib",
    "docs",
    "pkg",
];

const MARKERS_DEFAULT: [&str; 2] = [".git", "Cargo.toml"];

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enumerator binary; defaults to `repo-list` next to the running executable
    pub enumerator: Option<PathBuf>,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of stderr)
    pub log_file: Option<PathBuf>,

    /// Interactive selector settings
    pub selector: SelectorConfig,

    /// Terminal multiplexer settings
    pub launcher: LauncherConfig,

    /// Project discovery used by `repo-list`
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Selector program, looked up on PATH
    pub program: String,

    /// Preview command; `{}` is replaced by the highlighted line
    pub preview: String,

    /// Header line shown above the list
    pub header: String,

    /// Extra arguments passed before `--preview`
    pub args: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            program: "fzf".to_string(),
            preview: "tree -C {}".to_string(),
            header: "Projects:".to_string(),
            args: ["--layout", "reverse", "--preview-window", "right:nohidden"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Supported terminal multiplexers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Tmux,
    Zellij,
}

impl Backend {
    /// Binary name used when no explicit program is configured
    pub fn default_program(self) -> &'static str {
        match self {
            Backend::Tmux => "tmux",
            Backend::Zellij => "zellij",
        }
    }
}

/// What kind of page a pick opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTarget {
    /// A new window (tmux) or tab (zellij) in the current session
    #[default]
    Window,
    /// A detached tmux session, then switch the client to it
    Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    pub backend: Backend,

    pub page: PageTarget,

    /// Override the multiplexer binary (defaults to the backend name)
    pub program: Option<String>,

    /// Opt-in launcher timeout in milliseconds (0 = wait forever)
    pub timeout_ms: u64,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            page: PageTarget::default(),
            program: None,
            timeout_ms: 0,
        }
    }
}

impl LauncherConfig {
    pub fn program(&self) -> String {
        self.program
            .clone()
            .unwrap_or_else(|| self.backend.default_program().to_string())
    }
}

/// Marker-based project discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Entry names that mark a directory as a project
    pub markers: Vec<String>,

    /// Directory names never descended into
    pub ignore: Vec<String>,

    /// Descend into dot-directories
    pub traverse_hidden: bool,

    /// Stop descending once a directory matched
    pub stop_on_match: bool,

    pub include: Vec<IncludeEntry>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            markers: MARKERS_DEFAULT.map(String::from).to_vec(),
            ignore: IGNORE_DEFAULT.map(String::from).to_vec(),
            traverse_hidden: false,
            stop_on_match: true,
            include: vec![IncludeEntry::new(vec!["$HOME".to_string()])],
        }
    }
}

/// One group of discovery roots with optional overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IncludeEntry {
    /// Root directories; `$VAR` and `${VAR}` are expanded
    pub paths: Vec<String>,

    pub markers: Vec<String>,

    /// Also use `discovery.markers`
    pub use_root_markers: bool,

    pub ignore: Vec<String>,

    /// Also use `discovery.ignore`
    pub use_root_ignore: bool,

    /// Overrides `discovery.traverse_hidden`
    pub show_hidden: Option<bool>,

    /// Overrides `discovery.stop_on_match`
    pub stop_on_match: Option<bool>,

    /// Maximum depth below each root
    pub depth: u8,
}

impl Default for IncludeEntry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl IncludeEntry {
    pub fn new(paths: Vec<String>) -> Self {
        Self {
            paths,
            markers: Vec::new(),
            use_root_markers: true,
            ignore: Vec::new(),
            use_root_ignore: true,
            show_hidden: None,
            stop_on_match: None,
            depth: u8::MAX,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enumerator: None,
            debug: false,
            log_file: None,
            selector: SelectorConfig::default(),
            launcher: LauncherConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::config_file_path()?,
        };
        Self::load_from(&config_path)
    }

    /// Load configuration using a specific config file
    ///
    /// A missing file leaves the defaults in place.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(config_path))
            // Layer environment variables (REPO_TAB_ENUMERATOR, REPO_TAB_LAUNCHER__BACKEND, ...)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Resolve the enumerator binary
    ///
    /// An explicit setting is env-expanded; otherwise `repo-list` is expected
    /// in the same directory as the running executable.
    pub fn enumerator_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.enumerator {
            let raw = path.to_string_lossy();
            let expanded = expand(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "enumerator".to_string(),
                reason: e.to_string(),
            })?;
            return Ok(PathBuf::from(expanded));
        }

        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| ConfigError::InvalidValue {
            key: "enumerator".to_string(),
            reason: format!("{} has no parent directory", exe.display()),
        })?;
        Ok(dir.join(DEFAULT_ENUMERATOR))
    }

    fn validate(&self) -> Result<()> {
        if self.selector.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "selector.program".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if matches!(self.launcher.program.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "launcher.program".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if self.launcher.page == PageTarget::Session && self.launcher.backend != Backend::Tmux {
            return Err(ConfigError::InvalidValue {
                key: "launcher.page".to_string(),
                reason: "sessions are only supported with the tmux backend".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "repo-tab", "repo-tab").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}
