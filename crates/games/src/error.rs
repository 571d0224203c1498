//! Error types for the games collection.

/// Errors produced while mutating or exporting the games collection.
#[derive(Debug, thiserror::Error)]
pub enum GamesError {
    #[error("invalid game record: `{field}` must not be empty")]
    Validation { field: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
