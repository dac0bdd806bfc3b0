//! Typed document operations over one collection.

use std::marker::PhantomData;
use std::sync::Arc;

use pantry_core::ServiceError;
use pantry_kv::{DocumentStore, Fields, KVError};
use serde::{de::DeserializeOwned, Serialize};

/// Map a store error onto the service error taxonomy.
pub fn kv_err(e: KVError) -> ServiceError {
    match e {
        KVError::InvalidCollection(_) | KVError::InvalidKey(_) => {
            ServiceError::Validation(e.to_string())
        }
        KVError::Serialization(_) => ServiceError::Internal(e.to_string()),
        KVError::Remote { status: 404, message } => ServiceError::NotFound(message),
        other => ServiceError::Storage(other.to_string()),
    }
}

/// CRUD operations for documents of type `T` in a single collection.
///
/// Every call is one store round-trip. Nothing here makes a read followed
/// by a write atomic.
pub struct DocOps<T> {
    store: Arc<dyn DocumentStore>,
    collection: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> DocOps<T> {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            _phantom: PhantomData,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(&self, key: &str, fields: Fields) -> Result<T, ServiceError> {
        serde_json::from_value(serde_json::Value::Object(fields)).map_err(|e| {
            ServiceError::Internal(format!(
                "decode document '{}/{}': {}",
                self.collection, key, e
            ))
        })
    }

    fn encode(record: &T) -> Result<Fields, ServiceError> {
        match serde_json::to_value(record) {
            Ok(serde_json::Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(ServiceError::Internal(
                "document must serialize to a JSON object".to_string(),
            )),
            Err(e) => Err(ServiceError::Internal(format!("serialize: {}", e))),
        }
    }

    /// Get a document by key. Returns None if not found.
    pub async fn get(&self, key: &str) -> Result<Option<T>, ServiceError> {
        match self
            .store
            .get_document(&self.collection, key)
            .await
            .map_err(kv_err)?
        {
            Some(fields) => Ok(Some(self.decode(key, fields)?)),
            None => Ok(None),
        }
    }

    /// List every document in the collection as `(key, record)`, sorted by key.
    pub async fn list(&self) -> Result<Vec<(String, T)>, ServiceError> {
        let entries = self
            .store
            .list_documents(&self.collection)
            .await
            .map_err(kv_err)?;
        let mut records = Vec::with_capacity(entries.len());
        for (key, fields) in entries {
            let record = self.decode(&key, fields)?;
            records.push((key, record));
        }
        Ok(records)
    }

    /// Write a document, replacing whatever was stored under `key`.
    pub async fn save(&self, key: &str, record: &T) -> Result<(), ServiceError> {
        let fields = Self::encode(record)?;
        self.store
            .set_document(&self.collection, key, &fields)
            .await
            .map_err(kv_err)
    }

    /// Delete a document. Missing keys are not an error.
    pub async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        self.store
            .delete_document(&self.collection, key)
            .await
            .map_err(kv_err)
    }
}
