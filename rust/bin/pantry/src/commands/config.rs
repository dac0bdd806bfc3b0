//! `pantry config ...`: edit the client config file.

use std::path::Path;

use anyhow::Result;
use pantry::INVENTORY_COLLECTION;
use pantry_client::RemoteStore;

use crate::config::ClientConfig;

pub fn set_server(url: &str, config_path: &Path) -> Result<()> {
    // Reject URLs the client could never use.
    RemoteStore::new(url)?;

    let mut config = ClientConfig::load(config_path)?;
    config.server = url.to_string();
    config.save(config_path)?;
    println!("Server set to {}.", url);
    Ok(())
}

pub fn set_collection(name: &str, config_path: &Path) -> Result<()> {
    pantry_kv::check_collection(name)?;

    let mut config = ClientConfig::load(config_path)?;
    config.collection = name.to_string();
    config.save(config_path)?;
    println!("Collection set to {}.", name);
    Ok(())
}

pub fn show(config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(config_path)?;
    println!("Config:     {}", config_path.display());
    println!("Server:     {}", config.server().unwrap_or("-"));
    println!(
        "Collection: {}",
        config.collection().unwrap_or(INVENTORY_COLLECTION)
    );
    Ok(())
}
