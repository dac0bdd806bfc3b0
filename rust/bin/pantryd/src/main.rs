//! `pantryd`: the pantry document service.
//!
//! Usage:
//!   pantryd [-c <config.toml>] [--data-dir <dir>] [--db <file>] [--listen <addr>]
//!
//! Serves the document API over a redb database file.

mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pantry_kv::{DocumentStore, RedbStore};
use tracing::info;

use config::ServerConfig;

/// Pantry document service.
#[derive(Parser, Debug)]
#[command(name = "pantryd", about = "Pantry document service", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Data directory (the database defaults to <data-dir>/pantry.redb).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Database file (overrides --data-dir).
    #[arg(long = "db")]
    db: Option<PathBuf>,

    /// Listen address (default 0.0.0.0:8080).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    let service_config = file_config.into_service_config(cli.data_dir, cli.db, cli.listen);

    if let Some(dir) = &service_config.data_dir {
        std::fs::create_dir_all(dir)?;
    }
    let db_path = service_config.resolve_db_path();
    let store: Arc<dyn DocumentStore> = Arc::new(
        RedbStore::open(&db_path)
            .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?,
    );
    info!("Document store at {}", db_path.display());

    let app = routes::build_router(store);

    let listener = tokio::net::TcpListener::bind(&service_config.listen).await?;
    info!("pantryd listening on {}", service_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
