//! Catalog loading.
//!
//! A catalog is a directory tree of `data.json5` files, each holding a JSON5
//! array of [`Game`] records, so catalog authors can use comments and
//! trailing commas. Files are read in path order so the combined catalog is
//! stable across runs.

use std::ffi::OsStr;
use std::path::Path;

use save_uploader_games::Game;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::LocatorError;

/// The only JSON5 file name accepted inside a catalog tree.
pub const CATALOG_FILE_NAME: &str = "data.json5";

/// Loads and concatenates every `data.json5` under `root`.
///
/// Any other `.json5` file is treated as a mistake and rejected. Records
/// without a name or parent are skipped with a warning. An empty combined
/// catalog is an error, since a search over nothing is never what the
/// caller wanted.
pub fn load_catalog(root: &Path) -> Result<Vec<Game>, LocatorError> {
    let mut games = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) != Some("json5") {
            continue;
        }
        if entry.file_name() != OsStr::new(CATALOG_FILE_NAME) {
            return Err(LocatorError::UnexpectedCatalogFile(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let parsed = parse_catalog(&content).map_err(|source| LocatorError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let before = games.len();
        for game in parsed {
            match game.validate() {
                Ok(()) => games.push(game),
                Err(e) => {
                    warn!(path = %path.display(), name = %game.name, error = %e, "skipping catalog entry")
                }
            }
        }

        debug!(path = %path.display(), entries = games.len() - before, "catalog file loaded");
    }

    if games.is_empty() {
        return Err(LocatorError::EmptyCatalog(root.to_path_buf()));
    }

    Ok(games)
}

/// Parses a single catalog document.
pub fn parse_catalog(content: &str) -> Result<Vec<Game>, json5::Error> {
    json5::from_str(content)
}
