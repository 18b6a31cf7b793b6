//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using durable client storage.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying backend rejected the operation.
    #[error("storage backend failed: {0}")]
    Backend(String),

    /// A stored value could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
