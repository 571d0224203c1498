//! Configuration and event types for the search.

use std::path::PathBuf;

/// Default number of catalog entries checked at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Roots for whole-disk searches. Empty means the machine's disk roots.
    pub scan_roots: Vec<PathBuf>,
    /// Upper bound on concurrently checked catalog entries.
    pub max_concurrency: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            scan_roots: Vec::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Progress event emitted while searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A catalog entry was found on disk.
    Progress {
        name: String,
        total: u64,
        current: u64,
    },
    /// The search ended.
    Finished { found: u64, total: u64 },
}
