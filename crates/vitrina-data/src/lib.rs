//! Data access for Vitrina: repository traits over the backing store,
//! plus in-memory implementations for tests and local development.
//!
//! Repositories are the only writers of their records. Callers do not
//! resolve write conflicts; after a mutation they re-fetch.

pub mod discounts;
pub mod error;
pub mod orders;
pub mod products;
pub mod reviews;

pub use discounts::{DiscountRepository, MemoryDiscountRepository};
pub use error::DataError;
pub use orders::{MemoryOrderRepository, OrderRepository};
pub use products::{MemoryProductRepository, ProductRepository};
pub use reviews::{MemoryReviewRepository, ReviewRepository};
