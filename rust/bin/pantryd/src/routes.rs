//! Route registration: the document API plus system endpoints.

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use pantry_kv::DocumentStore;

pub fn build_router(store: Arc<dyn DocumentStore>) -> Router {
    let system_routes = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    pantry_store::document_router(store).merge(system_routes)
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "pantryd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
