//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Invalid review rating (must be 1..=5).
    #[error("invalid rating: {0}")]
    InvalidRating(u8),

    /// Currency mismatch in a money calculation.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// User-visible validation failure (missing checkout field, short
    /// review comment, and the like). Never raised as a panic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The storage backend rejected a read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

impl From<vitrina_store::StoreError> for CommerceError {
    fn from(e: vitrina_store::StoreError) -> Self {
        match e {
            vitrina_store::StoreError::Backend(msg) => CommerceError::Storage(msg),
            vitrina_store::StoreError::Serialization(err) => {
                CommerceError::Serialization(err.to_string())
            }
        }
    }
}
