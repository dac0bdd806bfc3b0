use async_trait::async_trait;

use crate::error::KVError;

/// The field map stored in one document. Writes always replace the whole map.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// DocumentStore is a keyed document database split into named collections.
///
/// Every method is a round-trip that may suspend (the store can be remote).
/// There is no transaction or compare-and-set primitive: a `get_document`
/// followed by `set_document` is not atomic with respect to other writers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List every document in a collection as `(key, fields)` pairs, sorted by key.
    /// A collection that has never been written is empty, not an error.
    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Fields)>, KVError>;

    /// Get one document. Returns None if the key does not exist.
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Fields>, KVError>;

    /// Store a document, replacing any previous fields under the same key.
    async fn set_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<(), KVError>;

    /// Delete a document. Deleting a missing key succeeds.
    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), KVError>;
}

/// Collection names are path segments on the wire: non-empty, no `/`.
pub fn check_collection(collection: &str) -> Result<(), KVError> {
    if collection.is_empty() || collection.contains('/') {
        return Err(KVError::InvalidCollection(collection.to_string()));
    }
    Ok(())
}

pub fn check_key(key: &str) -> Result<(), KVError> {
    if key.is_empty() {
        return Err(KVError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names() {
        assert!(check_collection("inventory").is_ok());
        assert!(check_collection("").is_err());
        assert!(matches!(
            check_collection("a/b"),
            Err(KVError::InvalidCollection(name)) if name == "a/b"
        ));
    }

    #[test]
    fn keys_must_be_non_empty() {
        assert!(check_key("apple").is_ok());
        assert!(check_key("green beans").is_ok());
        assert!(matches!(check_key(""), Err(KVError::InvalidKey(_))));
    }
}
