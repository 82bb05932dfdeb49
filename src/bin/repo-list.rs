//! repo-list - print project directories, one per line
//!
//! The default enumerator for `repo-tab`.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::debug;

use repo_tab::{
    Config, VERSION,
    discover::{Overrides, discover},
    logging::setup_logging,
};

#[derive(Parser)]
#[command(name = "repo-list")]
#[command(version = VERSION)]
#[command(about = "List project directories (git repositories, cargo crates, ...)")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum depth below each root
    #[arg(long)]
    depth: Option<u8>,

    /// Descend into hidden directories
    #[arg(long)]
    hidden: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Roots to search instead of the configured ones
    paths: Vec<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    setup_logging(cli.debug || config.debug, config.log_file.as_deref())?;

    Overrides {
        roots: cli.paths,
        depth: cli.depth,
        hidden: cli.hidden,
    }
    .apply(&mut config.discovery);

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let listed = discover(&config.discovery)?;
    debug!("listing {} directories", listed.len());

    let mut out = std::io::stdout().lock();
    for path in listed {
        writeln!(out, "{}", path.display())?;
    }
    out.flush()?;

    Ok(())
}
