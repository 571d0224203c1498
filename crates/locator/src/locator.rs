//! Search orchestrator.
//!
//! Checks every catalog entry concurrently, reports progress on a channel,
//! and supports cancellation.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use save_uploader_games::Game;
use tokio::sync::{Mutex, Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::LocatorError;
use crate::globs::any_glob_matches;
use crate::parent::{Directories, ParentDir, SearchBase};
use crate::scan;
use crate::types::{LocatorConfig, SearchEvent};

const EVENT_CAPACITY: usize = 256;

/// Finds which catalog entries have saves on this machine.
pub struct SaveLocator {
    config: LocatorConfig,
    dirs: Arc<Directories>,
    events_tx: mpsc::Sender<SearchEvent>,
    events_rx: Option<mpsc::Receiver<SearchEvent>>,
    cancel: CancellationToken,
}

impl SaveLocator {
    /// Creates a locator using the current user's directories.
    pub fn new(config: LocatorConfig) -> Self {
        Self::with_directories(config, Directories::detect())
    }

    /// Creates a locator with explicitly resolved directories.
    pub fn with_directories(config: LocatorConfig, dirs: Directories) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CAPACITY);
        Self {
            config,
            dirs: Arc::new(dirs),
            events_tx,
            events_rx: Some(events_rx),
            cancel: CancellationToken::new(),
        }
    }

    /// Takes the event receiver. Can only be called once.
    ///
    /// Once taken, the search waits for room in the channel, so every event
    /// is delivered; the receiver must be drained while `find_games` runs.
    /// If it is never taken, no events are sent.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<SearchEvent>> {
        self.events_rx.take()
    }

    /// Returns a cancellation token for this locator's searches.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns the catalog entries whose saves exist, in catalog order.
    ///
    /// Entries that cannot be checked (unknown parent keyword, unavailable
    /// directory) are logged and treated as not found.
    pub async fn find_games(&self, catalog: Vec<Game>) -> Vec<Game> {
        let total = catalog.len() as u64;
        let found = Arc::new(Mutex::new(Vec::new()));
        let counter = Arc::new(AtomicU64::new(0));
        let permits = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let roots = Arc::new(self.scan_roots());
        let events_tx = self.events_rx.is_none().then(|| self.events_tx.clone());

        let mut tasks = JoinSet::new();
        for (index, game) in catalog.into_iter().enumerate() {
            let found = Arc::clone(&found);
            let counter = Arc::clone(&counter);
            let permits = Arc::clone(&permits);
            let roots = Arc::clone(&roots);
            let dirs = Arc::clone(&self.dirs);
            let events_tx = events_tx.clone();
            let cancel = self.cancel.clone();

            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };

                let present = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => false,
                    result = locate(&dirs, &roots, &game) => match result {
                        Ok(present) => present,
                        Err(e) => {
                            warn!(name = %game.name, error = %e, "cannot check game");
                            false
                        }
                    },
                };

                if !present {
                    debug!(name = %game.name, "game not found");
                    return;
                }

                let current = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if let Some(tx) = &events_tx {
                    let _ = tx
                        .send(SearchEvent::Progress {
                            name: game.name.clone(),
                            total,
                            current,
                        })
                        .await;
                }
                debug!(name = %game.name, current, total, "game found");

                found.lock().await.push((index, game));
            });
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "search task failed");
            }
        }

        let mut found = std::mem::take(&mut *found.lock().await);
        found.sort_by_key(|(index, _)| *index);
        let games: Vec<Game> = found.into_iter().map(|(_, game)| game).collect();

        if let Some(tx) = &events_tx {
            let _ = tx
                .send(SearchEvent::Finished {
                    found: games.len() as u64,
                    total,
                })
                .await;
        }
        info!(found = games.len(), total, "search finished");

        games
    }

    fn scan_roots(&self) -> Vec<PathBuf> {
        if self.config.scan_roots.is_empty() {
            scan::disk_roots()
        } else {
            self.config.scan_roots.clone()
        }
    }
}

/// Checks a single catalog entry.
async fn locate(
    dirs: &Directories,
    roots: &[PathBuf],
    game: &Game,
) -> Result<bool, LocatorError> {
    let parent: ParentDir = game.parent.parse()?;

    match dirs.resolve(parent)? {
        SearchBase::Directory(base) => {
            // Leading separators would make `join` replace the base.
            let relative = game.directory.trim_start_matches(['/', '\\']);
            let base = if relative.is_empty() {
                base
            } else {
                base.join(relative)
            };
            debug!(
                name = %game.name,
                dir = %base.display(),
                exists = base.exists(),
                "checking game"
            );

            let globs = game.globs.clone();
            Ok(tokio::task::spawn_blocking(move || any_glob_matches(&base, &globs)).await?)
        }
        SearchBase::AllDisks => {
            let globs = disk_globs(game);
            scan::find_in_roots(roots.to_vec(), globs).await
        }
    }
}

/// Globs for a whole-disk search, prefixed with the entry's directory.
fn disk_globs(game: &Game) -> Vec<String> {
    let prefix = game.directory.trim_matches(|c| c == '/' || c == '\\');
    if prefix.is_empty() {
        return game.globs.clone();
    }
    game.globs
        .iter()
        .map(|glob| format!("{prefix}/{glob}"))
        .collect()
}
