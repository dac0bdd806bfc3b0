//! HTTP client for the pantry document service.
//!
//! [`RemoteStore`] implements [`DocumentStore`] by calling the routes served
//! by `pantry_store::document_router`, so a synchronizer can run against a
//! store living in another process exactly as it would against a local one.
//!
//! ```ignore
//! let store: Arc<dyn DocumentStore> = Arc::new(RemoteStore::new("http://localhost:8080")?);
//! let docs = store.list_documents("inventory").await?;
//! ```
//!
//! No request timeout is configured: a hung server hangs the caller.

use async_trait::async_trait;
use pantry_kv::{check_collection, check_key, DocumentStore, Fields, KVError};
use pantry_store::{DocumentEntry, DocumentList};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

/// Error body returned by the document service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Remote document store reached over HTTP.
#[derive(Clone)]
pub struct RemoteStore {
    http: reqwest::Client,
    base_url: Url,
}

impl RemoteStore {
    /// Create a client for the document service at `base_url`
    /// (e.g. `http://localhost:8080`).
    pub fn new(base_url: &str) -> Result<Self, KVError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| KVError::Network(format!("invalid server url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(KVError::Network(format!(
                "invalid server url '{}': not a base url",
                base_url
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build `{base}/docs/{collection}[/{key}]` with each segment percent-encoded.
    fn url(&self, collection: &str, key: Option<&str>) -> Result<Url, KVError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| KVError::Network(format!("invalid server url '{}'", self.base_url)))?;
            segments.pop_if_empty().push("docs").push(collection);
            if let Some(key) = key {
                segments.push(key);
            }
        }
        Ok(url)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<Response, KVError> {
        req.send()
            .await
            .map_err(|e| KVError::Network(e.to_string()))
    }

    /// Turn a non-success response into `KVError::Remote`.
    async fn remote_error(resp: Response) -> KVError {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => format!("{}: {}", body.code, body.message),
            Err(_) => text,
        };
        KVError::Remote { status, message }
    }
}

#[async_trait]
impl DocumentStore for RemoteStore {
    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Fields)>, KVError> {
        check_collection(collection)?;
        let url = self.url(collection, None)?;
        let resp = self.send(self.http.get(url)).await?;
        if !resp.status().is_success() {
            return Err(Self::remote_error(resp).await);
        }
        let list: DocumentList = resp
            .json()
            .await
            .map_err(|e| KVError::Serialization(format!("list response: {}", e)))?;
        debug!(collection, count = list.documents.len(), "remote list");
        Ok(list
            .documents
            .into_iter()
            .map(|entry| (entry.key, entry.fields))
            .collect())
    }

    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<Fields>, KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let url = self.url(collection, Some(key))?;
        let resp = self.send(self.http.get(url)).await?;

        if resp.status() == StatusCode::NOT_FOUND {
            // A 404 without the service's NOT_FOUND body means a wrong URL, not a missing doc.
            let text = resp.text().await.unwrap_or_default();
            return match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) if body.code == "NOT_FOUND" => Ok(None),
                _ => Err(KVError::Remote { status: 404, message: text }),
            };
        }
        if !resp.status().is_success() {
            return Err(Self::remote_error(resp).await);
        }
        let entry: DocumentEntry = resp
            .json()
            .await
            .map_err(|e| KVError::Serialization(format!("get response: {}", e)))?;
        Ok(Some(entry.fields))
    }

    async fn set_document(&self, collection: &str, key: &str, fields: &Fields) -> Result<(), KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let url = self.url(collection, Some(key))?;
        let resp = self.send(self.http.put(url).json(fields)).await?;
        if !resp.status().is_success() {
            return Err(Self::remote_error(resp).await);
        }
        debug!(collection, key, "remote set");
        Ok(())
    }

    async fn delete_document(&self, collection: &str, key: &str) -> Result<(), KVError> {
        check_collection(collection)?;
        check_key(key)?;
        let url = self.url(collection, Some(key))?;
        let resp = self.send(self.http.delete(url)).await?;
        if !resp.status().is_success() {
            return Err(Self::remote_error(resp).await);
        }
        debug!(collection, key, "remote delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pantry_kv::MemoryStore;
    use pantry_store::document_router;

    async fn spawn_server() -> (String, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let dyn_store: Arc<dyn DocumentStore> = store.clone();
        let app = document_router(dyn_store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), store)
    }

    fn quantity(n: u64) -> Fields {
        let mut fields = Fields::new();
        fields.insert("quantity".into(), n.into());
        fields
    }

    #[test]
    fn url_segments_are_encoded() {
        let remote = RemoteStore::new("http://localhost:8080/").unwrap();
        let url = remote.url("inventory", Some("green beans")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/docs/inventory/green%20beans");

        let prefixed = RemoteStore::new("http://localhost:8080/api").unwrap();
        let url = prefixed.url("inventory", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/docs/inventory");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(RemoteStore::new("not a url"), Err(KVError::Network(_))));
        assert!(matches!(RemoteStore::new("mailto:me@example.com"), Err(KVError::Network(_))));
    }

    #[tokio::test]
    async fn round_trips_against_live_server() {
        let (base, store) = spawn_server().await;
        let remote = RemoteStore::new(&base).unwrap();

        assert!(remote.list_documents("inventory").await.unwrap().is_empty());
        assert!(remote.get_document("inventory", "apple").await.unwrap().is_none());

        remote.set_document("inventory", "apple", &quantity(3)).await.unwrap();
        remote.set_document("inventory", "green beans", &quantity(1)).await.unwrap();
        assert_eq!(store.len(), 2);

        assert_eq!(
            remote.get_document("inventory", "green beans").await.unwrap(),
            Some(quantity(1))
        );

        let docs = remote.list_documents("inventory").await.unwrap();
        let keys: Vec<&str> = docs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["apple", "green beans"]);

        remote.delete_document("inventory", "apple").await.unwrap();
        remote.delete_document("inventory", "apple").await.unwrap();
        assert!(remote.get_document("inventory", "apple").await.unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn invalid_names_fail_before_any_request() {
        let remote = RemoteStore::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            remote.list_documents("a/b").await,
            Err(KVError::InvalidCollection(_))
        ));
        assert!(matches!(
            remote.get_document("inventory", "").await,
            Err(KVError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let remote = RemoteStore::new(&format!("http://{}", addr)).unwrap();
        let err = remote.list_documents("inventory").await.unwrap_err();
        assert!(matches!(err, KVError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn wrong_route_is_not_treated_as_missing() {
        let (base, _store) = spawn_server().await;
        let remote = RemoteStore::new(&format!("{}/nowhere", base)).unwrap();
        let err = remote.get_document("inventory", "apple").await.unwrap_err();
        assert!(matches!(err, KVError::Remote { status: 404, .. }), "got {err:?}");
    }
}
