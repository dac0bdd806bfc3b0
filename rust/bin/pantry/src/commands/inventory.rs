//! One-shot inventory commands: `list`, `new`, `add`, `remove`.

use std::io::{self, Write};

use anyhow::Result;
use pantry::{AppState, InventorySync, EMPTY_VIEW_MESSAGE};

use super::OutputFormat;

/// Print the visible items as cards (table) or a JSON array.
pub fn render(out: &mut impl Write, state: &AppState, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, state.visible_items())?;
            writeln!(out)
        }
        OutputFormat::Table => {
            if state.is_empty_view() {
                return writeln!(out, "{}", EMPTY_VIEW_MESSAGE);
            }
            writeln!(out, "{:24} {:>8}", "NAME", "QUANTITY")?;
            for item in state.visible_items() {
                writeln!(out, "{:24} {:>8}", item.display_name(), item.quantity)?;
            }
            Ok(())
        }
    }
}

fn quantity_of(sync: &InventorySync, name: &str) -> Option<u32> {
    sync.state()
        .inventory()
        .iter()
        .find(|i| i.name == name)
        .map(|i| i.quantity)
}

pub async fn list(sync: &mut InventorySync, query: Option<&str>, format: OutputFormat) -> Result<()> {
    sync.refresh().await?;
    if let Some(query) = query {
        sync.state_mut().search(query);
    }
    render(&mut io::stdout(), sync.state(), format)?;
    Ok(())
}

/// Fill and submit the add dialog in one go.
pub async fn new_item(sync: &mut InventorySync, name: &str, quantity: &str) -> Result<()> {
    let dialog = sync.state_mut().dialog_mut();
    dialog.open();
    dialog.set_name(name);
    dialog.set_quantity(quantity);

    if !sync.submit_dialog().await? {
        let message = sync
            .state()
            .dialog()
            .form()
            .and_then(|f| f.error.clone())
            .unwrap_or_else(|| "item not added".to_string());
        anyhow::bail!(message);
    }

    let total = quantity_of(sync, name).unwrap_or_default();
    println!("{}: {} in pantry.", name, total);
    Ok(())
}

pub async fn add(sync: &mut InventorySync, name: &str) -> Result<()> {
    sync.add_one(name).await?;
    match quantity_of(sync, name) {
        Some(total) => println!("{}: {} in pantry.", name, total),
        None => println!("{} is not in the pantry. Use `pantry new` to add it.", name),
    }
    Ok(())
}

pub async fn remove(sync: &mut InventorySync, name: &str) -> Result<()> {
    sync.remove_item(name).await?;
    match quantity_of(sync, name) {
        Some(left) => println!("{}: {} left.", name, left),
        None => println!("{}: none left.", name),
    }
    Ok(())
}
