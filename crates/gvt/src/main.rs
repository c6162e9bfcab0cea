//! gvt - snapshot-based version store.
//!
//! This is the main entry point for the gvt CLI.

mod commands;

use anyhow::Context;
use clap::Parser;
use commands::Outcome;
use gvt_core::{Repository, StoreConfig};
use gvt_util::LogConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "gvt")]
#[command(author, version, about = "Snapshot-based version store", long_about = None)]
#[command(
    after_help = "Commands:\n  init\n  add <file> [-m msg]\n  detach <file> [-m msg]\n  commit <file> [-m msg]\n  history [-last N]\n  version [id]\n  checkout <id>"
)]
struct Cli {
    /// Working directory (defaults to the current directory)
    #[arg(short = 'C', long)]
    dir: Option<PathBuf>,

    /// Name of the store directory inside the working directory
    #[arg(long)]
    store_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Command and its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    gvt_util::log::init(LogConfig::for_cli(cli.verbose, cli.log_file.clone()))
        .context("Failed to initialize logging")?;

    let work_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let outcome = run(&cli, &work_dir).await;
    debug!(code = outcome.code, "Command finished");
    outcome.print();

    std::process::exit(outcome.code)
}

/// Open the repository and dispatch the command.
async fn run(cli: &Cli, work_dir: &Path) -> Outcome {
    let mut config = match StoreConfig::load(work_dir).await {
        Ok(config) => config,
        Err(e) => return Outcome::system_failure(&e),
    };
    if let Some(store_dir) = &cli.store_dir {
        config = config.with_store_dir(store_dir.clone());
    }

    let mut repo = match Repository::load(work_dir, config).await {
        Ok(repo) => repo,
        Err(e) => return Outcome::system_failure(&e),
    };

    commands::dispatch(&mut repo, &cli.args).await
}
