//! Front-end state owned by the synchronizer.

use crate::dialog::AddDialog;
use crate::model::InventoryItem;
use crate::search::filter_items;

/// Shown when the visible list is empty.
pub const EMPTY_VIEW_MESSAGE: &str = "No items found. Please try a different search term.";

/// Everything a front end renders: the cached inventory, the search box and
/// its result set, and the add dialog.
///
/// `inventory` mirrors the remote collection as of the last refresh;
/// `visible` is what the item grid shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    inventory: Vec<InventoryItem>,
    visible: Vec<InventoryItem>,
    search_query: String,
    dialog: AddDialog,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn visible_items(&self) -> &[InventoryItem] {
        &self.visible
    }

    /// True when the grid would show the empty-state message.
    pub fn is_empty_view(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn dialog(&self) -> &AddDialog {
        &self.dialog
    }

    pub fn dialog_mut(&mut self) -> &mut AddDialog {
        &mut self.dialog
    }

    /// Install a freshly listed inventory.
    ///
    /// The result set goes back to the full list even if a search was
    /// applied; the query text is left as typed.
    pub fn replace_inventory(&mut self, items: Vec<InventoryItem>) {
        self.visible = items.clone();
        self.inventory = items;
    }

    /// Update the query text without filtering (typing in the search box).
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Filter the cached inventory by the current query text.
    pub fn apply_search(&mut self) {
        self.visible = filter_items(&self.inventory, &self.search_query);
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.set_search_query(query);
        self.apply_search();
    }

    /// Show the full cached list and clear the query text.
    pub fn reset_search(&mut self) {
        self.search_query.clear();
        self.visible = self.inventory.clone();
    }

    /// Clear the query text only; the current result set stays.
    pub fn clear_search_text(&mut self) {
        self.search_query.clear();
    }
}
