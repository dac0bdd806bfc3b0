//! `pantry`: the pantry inventory CLI.
//!
//! Talks to a `pantryd` document service (or a local database file with
//! `--db`) and shows the inventory as cards.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{OutputFormat, Target};

/// Pantry inventory CLI.
#[derive(Parser, Debug)]
#[command(name = "pantry", about = "Pantry inventory", version)]
struct Cli {
    /// Path to client config file (default: ~/.pantry/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Document service URL (overrides the config file).
    #[arg(long = "server", global = true)]
    server: Option<String>,

    /// Use a local database file instead of a server.
    #[arg(long = "db", global = true)]
    db: Option<PathBuf>,

    /// Collection holding the items (default: inventory).
    #[arg(long = "collection", global = true)]
    collection: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show items, optionally filtered by a search term.
    List {
        /// Case-insensitive substring of the item name.
        query: Option<String>,
    },

    /// Add a new item (or more of an existing one).
    New {
        /// Letters and spaces only.
        name: String,
        /// Positive whole number.
        quantity: String,
    },

    /// Add one unit of an item already in the pantry.
    Add { name: String },

    /// Remove one unit of an item; the last unit deletes it.
    Remove { name: String },

    /// Interactive shell.
    Shell,

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check server status.
    Status,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set the document service URL.
    SetServer { url: String },
    /// Set the collection name.
    SetCollection { name: String },
    /// Show the effective settings.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(config::ClientConfig::default_path);

    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::SetServer { url } => commands::config::set_server(url, &config_path)?,
            ConfigAction::SetCollection { name } => {
                commands::config::set_collection(name, &config_path)?
            }
            ConfigAction::Show => commands::config::show(&config_path)?,
        }
        return Ok(());
    }

    let client_config = config::ClientConfig::load(&config_path)?;
    let target = Target::resolve(&client_config, cli.server, cli.db, cli.collection);

    match cli.command {
        Commands::Status => commands::status::status(&target).await?,
        Commands::List { query } => {
            let mut sync = target.open()?;
            commands::inventory::list(&mut sync, query.as_deref(), cli.output).await?;
        }
        Commands::New { name, quantity } => {
            let mut sync = target.open()?;
            commands::inventory::new_item(&mut sync, &name, &quantity).await?;
        }
        Commands::Add { name } => {
            let mut sync = target.open()?;
            commands::inventory::add(&mut sync, &name).await?;
        }
        Commands::Remove { name } => {
            let mut sync = target.open()?;
            commands::inventory::remove(&mut sync, &name).await?;
        }
        Commands::Shell => {
            let sync = target.open()?;
            commands::shell::run(sync, cli.output).await?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
