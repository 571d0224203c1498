//! Save-game discovery.
//!
//! Loads a catalog of known save locations and checks which of them exist
//! on this machine. It is a library crate with no UI dependencies; found
//! entries are plain [`Game`](save_uploader_games::Game) records the caller
//! pushes into its own store.
//!
//! # Pipeline
//!
//! 1. **Catalog** - read every `data.json5` below the catalog root
//! 2. **Resolve** - map each entry's parent keyword to a directory
//! 3. **Match** - test the entry's globs below that directory
//! 4. **Scan** - for `GAMEDIR` entries, walk every disk root instead

pub mod catalog;
pub mod error;
pub mod globs;
pub mod locator;
pub mod parent;
pub mod scan;
pub mod types;

pub use catalog::{CATALOG_FILE_NAME, load_catalog, parse_catalog};
pub use error::LocatorError;
pub use globs::any_glob_matches;
pub use locator::SaveLocator;
pub use parent::{Directories, ParentDir, SearchBase};
pub use scan::{disk_roots, find_in_roots};
pub use types::{DEFAULT_MAX_CONCURRENCY, LocatorConfig, SearchEvent};
