//! Server-side configuration file.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/pantry"
//!
//! [server]
//! listen = "127.0.0.1:8080"
//! ```
//!
//! Every key is optional; command-line flags override the file.

use std::path::{Path, PathBuf};

use pantry_core::ServiceConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<PathBuf>,
    /// Explicit database file; wins over `data_dir`.
    pub db: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub listen: Option<String>,
}

impl ServerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Merge the file with flag overrides into the effective service config.
    pub fn into_service_config(
        self,
        data_dir: Option<PathBuf>,
        db: Option<PathBuf>,
        listen: Option<String>,
    ) -> ServiceConfig {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            data_dir: data_dir.or(self.storage.data_dir),
            db_path: db.or(self.storage.db),
            listen: listen.or(self.server.listen).unwrap_or(defaults.listen),
        }
    }
}
