//! Search run: load the catalog, find saves, fill the store, print.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{info, warn};

use save_uploader_games::{Game, GameStore, Snapshot};
use save_uploader_locator::{SaveLocator, SearchEvent, load_catalog};

use crate::config::Config;

/// Command-line overrides for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub catalog_dir: Option<PathBuf>,
    pub scan_roots: Vec<PathBuf>,
    pub json: bool,
}

/// Runs one search and prints the games that were found.
pub async fn run(mut config: Config, options: RunOptions) -> anyhow::Result<()> {
    if let Some(dir) = options.catalog_dir {
        config.catalog_dir = dir;
    }
    if !options.scan_roots.is_empty() {
        config.scan_roots = options.scan_roots;
    }

    let catalog = load_catalog(&config.catalog_dir)
        .with_context(|| format!("loading catalog from {}", config.catalog_dir.display()))?;
    info!(entries = catalog.len(), "catalog loaded");

    let store = Arc::new(Mutex::new(GameStore::new()));
    let mut locator = SaveLocator::new(config.locator_config());

    let forwarder = locator.take_events().map(|mut rx| {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    SearchEvent::Progress {
                        name,
                        total,
                        current,
                    } => info!(%name, current, total, "found"),
                    SearchEvent::Finished { found, total } => {
                        info!(found, total, "search complete")
                    }
                }
            }
        })
    });

    let cancel = locator.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping search");
            cancel.cancel();
        }
    });

    let games = refresh_games(&store, &locator, catalog).await?;
    interrupt.abort();

    // Dropping the locator closes the event channel so the forwarder drains.
    drop(locator);
    if let Some(handle) = forwarder {
        let _ = handle.await;
    }

    if options.json {
        println!("{}", store.lock().await.to_json()?);
    } else {
        print!("{}", render_table(&games));
    }

    Ok(())
}

/// Replaces the store's contents with the games found on disk.
///
/// The store keeps its previous contents if any found record is invalid.
pub async fn refresh_games(
    store: &Mutex<GameStore>,
    locator: &SaveLocator,
    catalog: Vec<Game>,
) -> anyhow::Result<Snapshot> {
    let found = locator.find_games(catalog).await;

    let mut store = store.lock().await;
    store.replace_all(found).context("storing found games")?;
    Ok(store.state())
}

/// Formats games as an aligned plain-text table.
pub fn render_table(games: &[Game]) -> String {
    if games.is_empty() {
        return "no saves found\n".to_string();
    }

    let name_width = games
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let parent_width = games
        .iter()
        .map(|g| g.parent.chars().count())
        .max()
        .unwrap_or(0)
        .max("PARENT".len());

    let mut out = format!(
        "{:<name_width$}  {:<parent_width$}  DIRECTORY\n",
        "NAME", "PARENT"
    );
    for game in games {
        out.push_str(&format!(
            "{:<name_width$}  {:<parent_width$}  {}\n",
            game.name, game.parent, game.directory
        ));
    }
    out
}
