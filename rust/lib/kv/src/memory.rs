use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::error::KVError;
use crate::traits::{DocumentStore, Fields, check_collection, check_key};

type Collections = BTreeMap<String, BTreeMap<String, Fields>>;

/// MemoryStore keeps every collection in process memory.
///
/// Ordered maps give sorted listings for free. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all collections.
    pub fn len(&self) -> usize {
        self.collections
            .read()
            .map(|c| c.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> KVError {
    KVError::Storage("memory store lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Fields)>, KVError> {
        check_collection(collection)?;
        let collections = self.collections.read().map_err(poisoned)?;
        let docs: Vec<(String, Fields)> = collections
            .get(collection)
            .map(|docs| docs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        debug!(collection, count = docs.len(), "memory list");
        Ok(docs)
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Fields>, KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(collection).and_then(|docs| docs.get(key)).cloned())
    }

    async fn set_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<(), KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), fields.clone());
        debug!(collection, key, "memory set");
        Ok(())
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let mut collections = self.collections.write().map_err(poisoned)?;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
            if docs.is_empty() {
                collections.remove(collection);
            }
        }
        debug!(collection, key, "memory delete");
        Ok(())
    }
}
