//! Client-side settings.
//!
//! Reads/writes `~/.pantry/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Document service URL (e.g. "http://localhost:8080").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Collection holding the items. Empty means `inventory`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collection: String,
}

impl ClientConfig {
    /// Default config file path: ~/.pantry/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn server(&self) -> Option<&str> {
        (!self.server.is_empty()).then_some(self.server.as_str())
    }

    pub fn collection(&self) -> Option<&str> {
        (!self.collection.is_empty()).then_some(self.collection.as_str())
    }
}

/// Return the pantry config directory (~/.pantry).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".pantry")
}
