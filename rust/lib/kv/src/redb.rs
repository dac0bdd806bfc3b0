use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition, TableError};
use tracing::debug;

use crate::error::KVError;
use crate::traits::{DocumentStore, Fields, check_collection, check_key};

/// One redb table per collection; values are JSON-encoded field maps.
fn table(collection: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(collection)
}

fn storage<E: std::fmt::Display>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

fn decode(bytes: &[u8]) -> Result<Fields, KVError> {
    serde_json::from_slice(bytes).map_err(|e| KVError::Serialization(e.to_string()))
}

/// RedbStore is a DocumentStore backed by redb, a pure-Rust embedded
/// key-value database. The file is created on first open.
///
/// redb transactions are blocking; each call runs on tokio's blocking pool
/// so a waiting writer never stalls the runtime threads serving requests.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        let db = Database::create(path).map_err(storage)?;
        debug!(path = %path.display(), "redb store opened");
        Ok(Self { db: Arc::new(db) })
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R, KVError>
    where
        F: FnOnce(&Database) -> Result<R, KVError> + Send + 'static,
        R: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| KVError::Storage(format!("redb task failed: {}", e)))?
    }
}

#[async_trait]
impl DocumentStore for RedbStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Fields)>, KVError> {
        check_collection(collection)?;
        let name = collection.to_string();
        let results = self
            .blocking(move |db| {
                let read_txn = db.begin_read().map_err(storage)?;
                let table = match read_txn.open_table(table(&name)) {
                    Ok(table) => table,
                    Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
                    Err(e) => return Err(storage(e)),
                };

                let mut results = Vec::new();
                for entry in table.iter().map_err(storage)? {
                    let (key, value) = entry.map_err(storage)?;
                    results.push((key.value().to_string(), decode(value.value())?));
                }
                Ok(results)
            })
            .await?;
        debug!(collection, count = results.len(), "redb list");
        Ok(results)
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Fields>, KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let (name, key) = (collection.to_string(), key.to_string());
        self.blocking(move |db| {
            let read_txn = db.begin_read().map_err(storage)?;
            let table = match read_txn.open_table(table(&name)) {
                Ok(table) => table,
                Err(TableError::TableDoesNotExist(_)) => return Ok(None),
                Err(e) => return Err(storage(e)),
            };

            match table.get(key.as_str()).map_err(storage)? {
                Some(value) => Ok(Some(decode(value.value())?)),
                None => Ok(None),
            }
        })
        .await
    }

    async fn set_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<(), KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let bytes = serde_json::to_vec(fields).map_err(|e| KVError::Serialization(e.to_string()))?;

        let (name, owned_key) = (collection.to_string(), key.to_string());
        self.blocking(move |db| {
            let write_txn = db.begin_write().map_err(storage)?;
            {
                let mut table = write_txn.open_table(table(&name)).map_err(storage)?;
                table.insert(owned_key.as_str(), bytes.as_slice()).map_err(storage)?;
            }
            write_txn.commit().map_err(storage)
        })
        .await?;
        debug!(collection, key, "redb set");
        Ok(())
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let (name, owned_key) = (collection.to_string(), key.to_string());
        self.blocking(move |db| {
            let write_txn = db.begin_write().map_err(storage)?;
            {
                let mut table = write_txn.open_table(table(&name)).map_err(storage)?;
                table.remove(owned_key.as_str()).map_err(storage)?;
            }
            write_txn.commit().map_err(storage)
        })
        .await?;
        debug!(collection, key, "redb delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract;

    #[tokio::test]
    async fn satisfies_contract() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("contract.redb")).unwrap();
        contract::run(&store).await;
    }

    #[tokio::test]
    async fn documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reopen.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store
                .set_document("inventory", "rice", &contract::fields(2))
                .await
                .unwrap();
        }

        let store = RedbStore::open(&path).unwrap();
        let docs = store.list_documents("inventory").await.unwrap();
        assert_eq!(docs, vec![("rice".to_string(), contract::fields(2))]);
    }

    #[tokio::test]
    async fn corrupt_value_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(&dir.path().join("corrupt.redb")).unwrap();

        let write_txn = store.db.begin_write().unwrap();
        {
            let mut t = write_txn.open_table(table("inventory")).unwrap();
            t.insert("flour", b"not json".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        let err = store.get_document("inventory", "flour").await.unwrap_err();
        assert!(matches!(err, KVError::Serialization(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn waiting_writer_leaves_runtime_free() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(RedbStore::open(&dir.path().join("busy.redb")).unwrap());

        // Hold the single write lock so the next writer has to wait.
        let held = store.db.begin_write().unwrap();
        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .set_document("inventory", "rice", &contract::fields(1))
                    .await
            })
        };
        tokio::task::yield_now().await;

        // The test runs on a single-threaded runtime: reads still complete.
        assert!(store.get_document("inventory", "rice").await.unwrap().is_none());
        assert!(!writer.is_finished());

        drop(held);
        writer.await.unwrap().unwrap();
        assert_eq!(
            store.get_document("inventory", "rice").await.unwrap(),
            Some(contract::fields(1))
        );
    }
}
