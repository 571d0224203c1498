//! Locator error types.

use std::path::PathBuf;

/// Errors produced while loading the catalog or searching for saves.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: malformed catalog: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("unexpected catalog file {}, only `data.json5` is allowed", .0.display())]
    UnexpectedCatalogFile(PathBuf),

    #[error("no catalog entries found under {}", .0.display())]
    EmptyCatalog(PathBuf),

    #[error("invalid parent directory: {0:?}")]
    InvalidParent(String),

    #[error("{0} directory is not available on this system")]
    DirectoryUnavailable(String),

    #[error("search task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
