//! Save uploader entry point.

mod app;
mod config;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Finds save-game directories listed in the catalog.
#[derive(Debug, Parser)]
#[command(name = "save-uploader", version, about)]
struct Cli {
    /// Catalog directory (overrides the configured one).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Root to scan for games with an unknown location. Repeatable.
    #[arg(long = "root")]
    roots: Vec<PathBuf>,

    /// Print found games as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,save_uploader=debug")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting save uploader");

    let config = config::Config::load()?;
    tracing::debug!(catalog = %config.catalog_dir.display(), "configuration loaded");

    let options = app::RunOptions {
        catalog_dir: cli.catalog,
        scan_roots: cli.roots,
        json: cli.json,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(config, options))
}
