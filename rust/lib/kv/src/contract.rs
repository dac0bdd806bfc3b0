//! Behavior every DocumentStore implementation must share.

use crate::error::KVError;
use crate::traits::{DocumentStore, Fields};

pub fn fields(quantity: u64) -> Fields {
    let mut fields = Fields::new();
    fields.insert("quantity".into(), quantity.into());
    fields
}

pub async fn run(store: &dyn DocumentStore) {
    // Empty collection lists as empty.
    assert!(store.list_documents("inventory").await.unwrap().is_empty());
    assert!(store.get_document("inventory", "apple").await.unwrap().is_none());

    // Set, then get.
    store.set_document("inventory", "pear", &fields(2)).await.unwrap();
    store.set_document("inventory", "apple", &fields(3)).await.unwrap();
    assert_eq!(
        store.get_document("inventory", "apple").await.unwrap(),
        Some(fields(3))
    );

    // Listing is sorted by key.
    let listed = store.list_documents("inventory").await.unwrap();
    let keys: Vec<&str> = listed.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["apple", "pear"]);

    // Set replaces the whole field map.
    let mut extra = fields(1);
    extra.insert("note".into(), "ripe".into());
    store.set_document("inventory", "apple", &extra).await.unwrap();
    store.set_document("inventory", "apple", &fields(7)).await.unwrap();
    let apple = store.get_document("inventory", "apple").await.unwrap().unwrap();
    assert_eq!(apple, fields(7));
    assert!(!apple.contains_key("note"));

    // Collections are isolated.
    assert!(store.list_documents("archive").await.unwrap().is_empty());

    // Keys may contain whitespace.
    store.set_document("inventory", "green beans", &fields(4)).await.unwrap();
    assert!(store.get_document("inventory", "green beans").await.unwrap().is_some());

    // Delete, and deleting again is fine.
    store.delete_document("inventory", "apple").await.unwrap();
    store.delete_document("inventory", "apple").await.unwrap();
    assert!(store.get_document("inventory", "apple").await.unwrap().is_none());
    assert_eq!(store.list_documents("inventory").await.unwrap().len(), 2);

    // Names are checked.
    assert!(matches!(
        store.list_documents("bad/name").await,
        Err(KVError::InvalidCollection(_))
    ));
    assert!(matches!(
        store.set_document("inventory", "", &fields(1)).await,
        Err(KVError::InvalidKey(_))
    ));
}
