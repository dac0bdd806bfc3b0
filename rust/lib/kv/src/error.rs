use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    #[error("invalid collection name: {0:?}")]
    InvalidCollection(String),

    #[error("invalid document key: {0:?}")]
    InvalidKey(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("remote store returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },
}
