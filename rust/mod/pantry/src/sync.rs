//! Inventory synchronizer.
//!
//! Every mutation reads the item's document, computes the new quantity,
//! writes or deletes the document, then reloads the whole collection into
//! [`AppState`].
//!
//! Known hazard: the read and the write are separate round-trips with no
//! version check. Two synchronizers (or two processes) updating the same
//! item can both read the same quantity and both write `old ± n`, losing
//! one update. Within one `InventorySync` operations take `&mut self` and
//! cannot interleave.

use std::sync::Arc;

use pantry_core::ServiceError;
use pantry_kv::DocumentStore;
use pantry_store::DocOps;
use tracing::{debug, info};

use crate::model::{InventoryItem, ItemDoc, INVENTORY_COLLECTION};
use crate::state::AppState;

pub struct InventorySync {
    items: DocOps<ItemDoc>,
    state: AppState,
}

impl InventorySync {
    /// Synchronizer over the default `inventory` collection. State starts
    /// empty; call [`refresh`](Self::refresh) to load it.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, INVENTORY_COLLECTION)
    }

    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: &str) -> Self {
        Self {
            items: DocOps::new(store, collection),
            state: AppState::new(),
        }
    }

    pub fn collection(&self) -> &str {
        self.items.collection()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Local-only state changes (search, dialog edits) go through here.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Reload every item from the store, replacing the cached list.
    ///
    /// An applied search filter is dropped (see [`AppState::replace_inventory`]).
    pub async fn refresh(&mut self) -> Result<(), ServiceError> {
        let items: Vec<InventoryItem> = self
            .items
            .list()
            .await?
            .into_iter()
            .map(|(name, doc)| InventoryItem::from_doc(name, doc))
            .collect();
        debug!(collection = self.items.collection(), count = items.len(), "inventory refreshed");
        self.state.replace_inventory(items);
        Ok(())
    }

    /// Add `quantity` units of `name`, creating the item if it does not exist.
    ///
    /// The new total is written as a full document replacement, not a
    /// server-side increment. A zero quantity or a total beyond `u32::MAX`
    /// is rejected before anything is written.
    pub async fn add_item(&mut self, name: &str, quantity: u32) -> Result<(), ServiceError> {
        if quantity == 0 {
            return Err(ServiceError::Validation(format!(
                "cannot add zero units of '{}'",
                name
            )));
        }

        let current = self.items.get(name).await?;
        self.stock(name, current, quantity).await
    }

    /// Per-card "Add": one more unit of an item already in the pantry.
    ///
    /// Only stored items have a card, so an unknown name changes nothing
    /// (the list is still reloaded). New items come in through the dialog.
    pub async fn add_one(&mut self, name: &str) -> Result<(), ServiceError> {
        match self.items.get(name).await? {
            Some(doc) => self.stock(name, Some(doc), 1).await,
            None => {
                debug!(name, "add of unknown item ignored");
                self.refresh().await
            }
        }
    }

    /// Write `current + quantity` for `name`, then reload.
    async fn stock(
        &mut self,
        name: &str,
        current: Option<ItemDoc>,
        quantity: u32,
    ) -> Result<(), ServiceError> {
        let total = match current {
            Some(doc) => doc.quantity.checked_add(quantity).ok_or_else(|| {
                ServiceError::Validation(format!("quantity of '{}' would overflow", name))
            })?,
            None => quantity,
        };

        self.items.save(name, &ItemDoc { quantity: total }).await?;
        info!(name, added = quantity, quantity = total, "item stocked");

        self.refresh().await
    }

    /// Take one unit of `name` away.
    ///
    /// The last unit deletes the document; a quantity of 0 is never written.
    /// An unknown name changes nothing (the list is still reloaded).
    pub async fn remove_item(&mut self, name: &str) -> Result<(), ServiceError> {
        match self.items.get(name).await? {
            Some(doc) if doc.quantity <= 1 => {
                self.items.delete(name).await?;
                info!(name, "last unit removed, item deleted");
            }
            Some(doc) => {
                let quantity = doc.quantity - 1;
                self.items.save(name, &ItemDoc { quantity }).await?;
                info!(name, quantity, "item removed");
            }
            None => {
                debug!(name, "remove of unknown item ignored");
            }
        }

        self.refresh().await
    }

    /// Submit the add dialog.
    ///
    /// Returns `Ok(true)` when an item was added. Invalid input leaves the
    /// dialog open with its message and returns `Ok(false)` without touching
    /// the store; so does submitting a closed dialog.
    pub async fn submit_dialog(&mut self) -> Result<bool, ServiceError> {
        match self.state.dialog_mut().submit() {
            Ok(Some(item)) => {
                self.add_item(&item.name, item.quantity).await?;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                debug!(error = %e, "add dialog input rejected");
                Ok(false)
            }
        }
    }
}
