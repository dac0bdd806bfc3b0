use crate::model::InventoryItem;

/// Items whose name contains `query`, ignoring case. An empty query keeps everything.
pub fn filter_items(items: &[InventoryItem], query: &str) -> Vec<InventoryItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
