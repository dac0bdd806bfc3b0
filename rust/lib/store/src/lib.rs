//! Pantry store layer.
//!
//! `DocOps<T>` gives typed access to one collection of a `DocumentStore`:
//! each document's field map is (de)serialized as `T`, the document key is
//! carried alongside. `document_router` exposes a `DocumentStore` over HTTP
//! so that other processes can use it as a remote store.
//!
//! ```ignore
//! let items = DocOps::<ItemDoc>::new(store, "inventory");
//! if let Some(doc) = items.get("apple").await? { /* ... */ }
//! ```

pub mod ops;
pub mod router;

pub use ops::{kv_err, DocOps};
pub use router::{document_router, DocumentEntry, DocumentList};
