//! Whole-disk directory scan for games with an unknown install location.
//!
//! Each root is walked depth-first in its own task. Every directory found is
//! streamed over a channel so glob checks can start before the walk ends,
//! and stop it early once a match turns up.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::debug;

use crate::error::LocatorError;
use crate::globs::any_glob_matches;

/// Directories never worth descending into.
const AVOID_DIRS: [&str; 2] = ["Windows", "AppData"];

/// Operating system directories, skipped on every root.
const SYSTEM_DIRS: [&str; 6] = [
    "System32",
    "WinNT",
    "Program Files",
    "Program Files (x86)",
    "ProgramData",
    "$Recycle.Bin",
];

/// Pending directories are checked in batches of this size.
const CHECK_BATCH: usize = 64;

const CHANNEL_CAPACITY: usize = 1000;

/// Whether a directory name is excluded from scanning.
pub fn is_skipped(name: &str) -> bool {
    AVOID_DIRS.contains(&name) || SYSTEM_DIRS.contains(&name)
}

/// Walks `root` and sends every non-skipped directory below it.
///
/// Access errors on individual directories are logged and skipped. The walk
/// stops quietly once the receiver is dropped.
pub async fn scan_directory(root: &Path, sender: mpsc::Sender<PathBuf>) -> std::io::Result<()> {
    let mut queue = vec![root.to_path_buf()];

    while let Some(current) = queue.pop() {
        let mut entries = match tokio::fs::read_dir(&current).await {
            Ok(entries) => entries,
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::PermissionDenied | ErrorKind::NotFound | ErrorKind::InvalidInput
                ) =>
            {
                debug!(dir = %current.display(), error = %e, "skipping directory");
                continue;
            }
            Err(e) => return Err(e),
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    debug!(dir = %current.display(), error = %e, "error reading entry");
                    break;
                }
            };

            let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
            if !is_dir {
                continue;
            }

            let path = entry.path();
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_skipped);
            if skipped {
                continue;
            }

            if sender.send(path.clone()).await.is_err() {
                return Ok(());
            }
            queue.push(path);
        }
    }

    Ok(())
}

/// Logical disk roots of this machine.
#[cfg(windows)]
pub fn disk_roots() -> Vec<PathBuf> {
    ('A'..='Z')
        .map(|letter| PathBuf::from(format!("{letter}:\\")))
        .filter(|root| root.exists())
        .collect()
}

/// Logical disk roots of this machine.
#[cfg(not(windows))]
pub fn disk_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/")]
}

/// Whether any directory below `roots` (roots included) satisfies `globs`.
pub async fn find_in_roots(roots: Vec<PathBuf>, globs: Vec<String>) -> Result<bool, LocatorError> {
    if globs.is_empty() {
        return Ok(false);
    }

    let (sender, mut receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let mut walkers = JoinSet::new();

    for root in &roots {
        if sender.send(root.clone()).await.is_err() {
            break;
        }
    }
    for root in roots {
        let sender = sender.clone();
        walkers.spawn(async move {
            if let Err(e) = scan_directory(&root, sender).await {
                debug!(root = %root.display(), error = %e, "error scanning root");
            }
        });
    }
    drop(sender);

    let globs = Arc::new(globs);
    let mut batch = Vec::with_capacity(CHECK_BATCH);

    while receiver.recv_many(&mut batch, CHECK_BATCH).await > 0 {
        let dirs = std::mem::take(&mut batch);
        let globs = Arc::clone(&globs);
        let found =
            tokio::task::spawn_blocking(move || dirs.iter().any(|d| any_glob_matches(d, &globs)))
                .await?;

        if found {
            walkers.abort_all();
            return Ok(true);
        }
    }

    while let Some(result) = walkers.join_next().await {
        if let Err(e) = result {
            debug!(error = %e, "scan task ended abnormally");
        }
    }

    Ok(false)
}
