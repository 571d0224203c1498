//! Domain types for discovered games.

use serde::{Deserialize, Serialize};

use crate::error::GamesError;

/// A known save-game location.
///
/// `parent`, `directory`, `globs` and `image` are opaque here; the locator
/// gives them meaning when it searches the disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub parent: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub globs: Vec<String>,
    #[serde(default)]
    pub image: String,
}

impl Game {
    /// Checks the fields a record cannot do without. Whitespace-only counts as empty.
    pub fn validate(&self) -> Result<(), GamesError> {
        if self.name.trim().is_empty() {
            return Err(GamesError::Validation { field: "name" });
        }
        if self.parent.trim().is_empty() {
            return Err(GamesError::Validation { field: "parent" });
        }
        Ok(())
    }
}
