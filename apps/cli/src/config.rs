//! Configuration management.
//!
//! Configuration is stored as TOML in the platform config directory:
//! - Linux: `~/.config/save-uploader/config.toml`
//! - Windows: `%APPDATA%\lobinuxsoft\save-uploader\config\config.toml`

use std::path::{Path, PathBuf};

use save_uploader_locator::{DEFAULT_MAX_CONCURRENCY, LocatorConfig};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the `data.json5` catalog files.
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    /// Roots for whole-disk searches (empty = every disk).
    #[serde(default)]
    pub scan_roots: Vec<PathBuf>,

    /// Catalog entries checked at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            scan_roots: Vec::new(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from `path`, writing defaults there if missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Search settings derived from this configuration.
    pub fn locator_config(&self) -> LocatorConfig {
        LocatorConfig {
            scan_roots: self.scan_roots.clone(),
            max_concurrency: self.max_concurrency,
        }
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "lobinuxsoft", "save-uploader")
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(dirs.config_dir().join("config.toml"))
}
