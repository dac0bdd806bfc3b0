//! Pantry inventory: the synchronization core.
//!
//! Items live as documents keyed by name in a remote collection. The
//! [`InventorySync`] owns the [`AppState`] a front end renders: the cached
//! item list, the search view, and the add dialog. Every mutation is a
//! read-modify-write against the store followed by a full reload.
//!
//! ```ignore
//! let mut pantry = InventorySync::new(store);
//! pantry.refresh().await?;
//! pantry.add_item("apple", 3).await?;
//! pantry.state_mut().search("app");
//! for item in pantry.state().visible_items() { /* render a card */ }
//! ```

pub mod dialog;
pub mod model;
pub mod search;
pub mod state;
pub mod sync;
pub mod validate;

pub use dialog::{AddDialog, AddForm};
pub use model::{InventoryItem, ItemDoc, INVENTORY_COLLECTION};
pub use search::filter_items;
pub use state::{AppState, EMPTY_VIEW_MESSAGE};
pub use sync::InventorySync;
pub use validate::{validate_new_item, NewItem, ValidationError};
