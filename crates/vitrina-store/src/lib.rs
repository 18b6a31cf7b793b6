//! Durable client-side storage boundary for Vitrina.
//!
//! The storefront persists its cart and favorites ledgers to an
//! origin-scoped string key/value store. This crate models that boundary
//! as a [`KeyValueBackend`] trait plus a typed [`Store`] wrapper with
//! automatic JSON serialization, so ledgers can be handed a real backend
//! in production and [`MemoryBackend`] in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrina_store::{MemoryBackend, Store};
//!
//! let store = Store::in_memory();
//!
//! // Store a value
//! store.set("cart_items", &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<CartLine>> = store.get("cart_items")?;
//!
//! // Delete a value
//! store.remove("cart_items")?;
//! ```

mod error;
mod kv;

pub use error::StoreError;
pub use kv::{KeyValueBackend, MemoryBackend, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{KeyValueBackend, MemoryBackend, Store, StoreError};
}
