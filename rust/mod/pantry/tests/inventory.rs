//! End-to-end inventory flows over the real store backends.

use std::sync::Arc;

use pantry::{InventorySync, EMPTY_VIEW_MESSAGE};
use pantry_client::RemoteStore;
use pantry_kv::{DocumentStore, RedbStore};

fn names(sync: &InventorySync) -> Vec<(String, u32)> {
    sync.state()
        .visible_items()
        .iter()
        .map(|i| (i.name.clone(), i.quantity))
        .collect()
}

#[tokio::test]
async fn redb_inventory_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pantry.redb");

    {
        let store: Arc<dyn DocumentStore> = Arc::new(RedbStore::open(&path).unwrap());
        let mut sync = InventorySync::new(store);
        sync.add_item("apple", 3).await.unwrap();
        sync.add_item("green beans", 1).await.unwrap();
        sync.remove_item("green beans").await.unwrap();
        sync.add_one("apple").await.unwrap();
    }

    let store: Arc<dyn DocumentStore> = Arc::new(RedbStore::open(&path).unwrap());
    let mut sync = InventorySync::new(store);
    sync.refresh().await.unwrap();
    assert_eq!(names(&sync), vec![("apple".to_string(), 4)]);
}

#[tokio::test]
async fn search_flow_over_redb() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn DocumentStore> =
        Arc::new(RedbStore::open(&dir.path().join("pantry.redb")).unwrap());
    let mut sync = InventorySync::new(store);

    for (name, qty) in [("apple", 2), ("pineapple", 1), ("rice", 5)] {
        sync.add_item(name, qty).await.unwrap();
    }

    sync.state_mut().search("APPLE");
    assert_eq!(
        names(&sync),
        vec![("apple".to_string(), 2), ("pineapple".to_string(), 1)]
    );

    sync.state_mut().search("flour");
    assert!(sync.state().is_empty_view());
    assert!(!EMPTY_VIEW_MESSAGE.is_empty());

    sync.state_mut().reset_search();
    assert_eq!(names(&sync).len(), 3);
}

#[tokio::test]
async fn remote_inventory_against_document_service() {
    let backing: Arc<dyn DocumentStore> = Arc::new(pantry_kv::MemoryStore::new());
    let app = pantry_store::document_router(Arc::clone(&backing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let remote: Arc<dyn DocumentStore> =
        Arc::new(RemoteStore::new(&format!("http://{}", addr)).unwrap());
    let mut sync = InventorySync::new(remote);

    sync.refresh().await.unwrap();
    assert!(sync.state().inventory().is_empty());

    let dialog = sync.state_mut().dialog_mut();
    dialog.open();
    dialog.set_name("green beans");
    dialog.set_quantity("2");
    assert!(sync.submit_dialog().await.unwrap());

    sync.add_item("green beans", 1).await.unwrap();
    sync.remove_item("green beans").await.unwrap();
    assert_eq!(names(&sync), vec![("green beans".to_string(), 2)]);

    // The service side holds exactly what the synchronizer wrote.
    let doc = backing
        .get_document("inventory", "green beans")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc["quantity"], 2);

    sync.remove_item("green beans").await.unwrap();
    sync.remove_item("green beans").await.unwrap();
    assert!(sync.state().inventory().is_empty());
    assert!(backing.list_documents("inventory").await.unwrap().is_empty());
}
