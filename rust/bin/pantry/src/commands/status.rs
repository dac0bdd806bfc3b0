//! `pantry status`: where the inventory lives and whether it is reachable.

use anyhow::Result;

use super::Target;

pub async fn status(target: &Target) -> Result<()> {
    println!("Collection: {}", target.collection);

    if let Some(db) = &target.db {
        println!("Store:      local {}", db.display());
        return Ok(());
    }

    let Some(server) = target.server.as_deref() else {
        println!("Server:     -");
        println!("Status:     no server configured");
        return Ok(());
    };
    println!("Server:     {}", server);

    let url = format!("{}/health", server.trim_end_matches('/'));
    match reqwest::get(&url).await {
        Ok(resp) if resp.status().is_success() => println!("Status:     connected"),
        Ok(resp) => println!("Status:     error ({})", resp.status()),
        Err(e) => println!("Status:     disconnected ({})", e),
    }
    Ok(())
}
