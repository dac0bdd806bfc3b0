pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryStore;
pub use self::redb::RedbStore;
pub use traits::{DocumentStore, Fields, check_collection, check_key};

#[cfg(test)]
pub(crate) mod contract;
