use serde::{Deserialize, Serialize};

/// Default collection holding one document per item.
pub const INVENTORY_COLLECTION: &str = "inventory";

/// Stored fields of an item document. The item name is the document key
/// and is not repeated inside the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDoc {
    pub quantity: u32,
}

/// An item as the front end sees it: document key plus fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    pub(crate) fn from_doc(name: String, doc: ItemDoc) -> Self {
        Self {
            name,
            quantity: doc.quantity,
        }
    }

    /// Name as shown on a card: first character upper-cased, rest untouched.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
