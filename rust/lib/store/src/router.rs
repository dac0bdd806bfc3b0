//! Document router: serves a `DocumentStore` over HTTP.
//!
//! Routes:
//!   GET    /docs/{collection}        list documents
//!   GET    /docs/{collection}/{key}  get one document
//!   PUT    /docs/{collection}/{key}  full replace (body = field map)
//!   DELETE /docs/{collection}/{key}  delete (missing keys succeed)

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use pantry_core::ServiceError;
use pantry_kv::{DocumentStore, Fields};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ops::kv_err;

/// One document on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub key: String,
    pub fields: Fields,
}

/// Response body of the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<DocumentEntry>,
}

type DocState = Arc<dyn DocumentStore>;

/// Build the document router over the given store.
pub fn document_router(store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .route("/docs/{collection}", get(list_handler))
        .route(
            "/docs/{collection}/{key}",
            get(get_handler).put(put_handler).delete(delete_handler),
        )
        .with_state(store)
}

async fn list_handler(
    State(store): State<DocState>,
    Path(collection): Path<String>,
) -> Result<Json<DocumentList>, ServiceError> {
    let documents = store
        .list_documents(&collection)
        .await
        .map_err(kv_err)?
        .into_iter()
        .map(|(key, fields)| DocumentEntry { key, fields })
        .collect();
    Ok(Json(DocumentList { documents }))
}

async fn get_handler(
    State(store): State<DocState>,
    Path((collection, key)): Path<(String, String)>,
) -> Result<Json<DocumentEntry>, ServiceError> {
    match store.get_document(&collection, &key).await.map_err(kv_err)? {
        Some(fields) => Ok(Json(DocumentEntry { key, fields })),
        None => Err(ServiceError::NotFound(format!(
            "document '{}/{}' not found",
            collection, key
        ))),
    }
}

async fn put_handler(
    State(store): State<DocState>,
    Path((collection, key)): Path<(String, String)>,
    Json(fields): Json<Fields>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    store
        .set_document(&collection, &key, &fields)
        .await
        .map_err(kv_err)?;
    debug!(%collection, %key, "document replaced");
    Ok(Json(serde_json::json!({"ok": true})))
}

async fn delete_handler(
    State(store): State<DocState>,
    Path((collection, key)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    store
        .delete_document(&collection, &key)
        .await
        .map_err(kv_err)?;
    debug!(%collection, %key, "document deleted");
    Ok(Json(serde_json::json!({"ok": true})))
}
