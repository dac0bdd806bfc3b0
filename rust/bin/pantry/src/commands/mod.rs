pub mod config;
pub mod inventory;
pub mod shell;
pub mod status;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use pantry::{InventorySync, INVENTORY_COLLECTION};
use pantry_client::RemoteStore;
use pantry_kv::{DocumentStore, RedbStore};
use tracing::debug;

use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Where the inventory lives, after merging flags with the config file.
#[derive(Debug, Clone)]
pub struct Target {
    pub server: Option<String>,
    pub db: Option<PathBuf>,
    pub collection: String,
}

impl Target {
    /// Flags win over the config file.
    pub fn resolve(
        config: &ClientConfig,
        server: Option<String>,
        db: Option<PathBuf>,
        collection: Option<String>,
    ) -> Self {
        Self {
            server: server.or_else(|| config.server().map(str::to_string)),
            db,
            collection: collection
                .or_else(|| config.collection().map(str::to_string))
                .unwrap_or_else(|| INVENTORY_COLLECTION.to_string()),
        }
    }

    /// Open the store and wrap it in a synchronizer. A local `--db` file
    /// takes precedence over a configured server.
    pub fn open(&self) -> Result<InventorySync> {
        let store: Arc<dyn DocumentStore> = if let Some(db) = &self.db {
            debug!(path = %db.display(), "using local document store");
            Arc::new(
                RedbStore::open(db)
                    .map_err(|e| anyhow::anyhow!("failed to open {}: {}", db.display(), e))?,
            )
        } else if let Some(server) = &self.server {
            debug!(server = %server, "using remote document store");
            Arc::new(RemoteStore::new(server)?)
        } else {
            anyhow::bail!(
                "No server configured. Run `pantry config set-server <url>` or pass --db <file>."
            );
        };
        Ok(InventorySync::with_collection(store, &self.collection))
    }
}
