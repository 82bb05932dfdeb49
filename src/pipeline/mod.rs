//! Pick-and-open pipeline
//!
//! Runs the three collaborators strictly in order:
//! - [`Enumerate`] - lists candidate directories
//! - [`Select`] - lets the user pick one interactively
//! - [`Launch`] - opens a multiplexer page at the pick
//!
//! Two early exits: a failing enumerator (error) and an empty pick
//! ([`Outcome::Cancelled`]).

mod enumerate;
pub mod label;
mod select;

pub use enumerate::*;
pub use label::{derive_label, trim_selection};
pub use select::*;

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::mux;

/// Ordered candidate paths from one enumerator run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    entries: Vec<String>,
}

impl Candidates {
    /// Parse newline-separated enumerator output, dropping blank lines
    pub fn parse(output: &str) -> Self {
        Self {
            entries: output
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Selector stdin: one entry per line
    pub fn to_input(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let mut input = self.entries.join("\n");
        input.push('\n');
        input
    }
}

/// A request to open one multiplexer page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Absolute working directory
    pub dir: PathBuf,
    /// Display name
    pub label: String,
}

impl Page {
    /// Build the page for a trimmed, non-empty selection
    pub fn from_selection(selection: &str) -> Result<Self> {
        let dir = std::path::absolute(selection)?;
        let label = derive_label(&dir);
        Ok(Self { dir, label })
    }
}

/// How a pipeline run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user aborted the selector
    Cancelled,
    /// The launcher ran; `code` is its exit status
    Launched { page: Page, code: i32 },
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Cancelled => 0,
            Outcome::Launched { code, .. } => *code,
        }
    }
}

/// Produces the candidate list
#[async_trait]
pub trait Enumerate: Send + Sync {
    /// Run once with the forwarded arguments
    async fn enumerate(&self, args: &[OsString]) -> Result<Candidates>;
}

/// Interactive filter over the candidates
#[async_trait]
pub trait Select: Send + Sync {
    /// Raw selector output; empty when the user aborted
    async fn select(&self, candidates: &Candidates) -> Result<String>;
}

/// Opens a page in the terminal multiplexer
#[async_trait]
pub trait Launch: Send + Sync {
    /// Returns the launcher's exit code
    async fn open_page(&self, page: &Page) -> Result<i32>;
}

/// The enumerate → select → launch glue
pub struct Pipeline {
    enumerator: Box<dyn Enumerate>,
    selector: Box<dyn Select>,
    launcher: Box<dyn Launch>,
}

impl Pipeline {
    pub fn new(
        enumerator: Box<dyn Enumerate>,
        selector: Box<dyn Select>,
        launcher: Box<dyn Launch>,
    ) -> Self {
        Self {
            enumerator,
            selector,
            launcher,
        }
    }

    /// Wire up the external collaborators described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let enumerator = ExternalEnumerator::new(config.enumerator_path()?);
        let selector = FzfSelector::from_config(&config.selector);
        let launcher = mux::launcher_for(&config.launcher);

        Ok(Self::new(Box::new(enumerator), Box::new(selector), launcher))
    }

    /// Run the whole flow once
    #[instrument(skip(self))]
    pub async fn run(&self, args: &[OsString]) -> Result<Outcome> {
        let candidates = self.enumerator.enumerate(args).await?;
        debug!("{} candidates", candidates.len());

        let raw = self.selector.select(&candidates).await?;
        let selection = trim_selection(&raw);
        if selection.is_empty() {
            info!("Nothing selected");
            return Ok(Outcome::Cancelled);
        }

        let page = Page::from_selection(&selection)?;
        info!("Opening {:?} as '{}'", page.dir, page.label);

        let code = self.launcher.open_page(&page).await?;
        Ok(Outcome::Launched { page, code })
    }
}
