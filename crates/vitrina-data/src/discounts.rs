//! Discount code repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrina_commerce::cart::{Discount, DiscountBook};

use crate::error::DataError;

#[async_trait]
pub trait DiscountRepository: Send + Sync {
    /// Looks up a code without checking applicability. Normalization
    /// (trim, uppercase) matches the in-cart validation.
    async fn find_by_code(&self, code: &str) -> Result<Discount, DataError>;

    /// Persists one redemption of `code`, so a capped code eventually
    /// stops validating for every client.
    async fn record_usage(&self, code: &str) -> Result<(), DataError>;
}

/// In-memory discount store over a [`DiscountBook`].
pub struct MemoryDiscountRepository {
    book: RwLock<DiscountBook>,
}

impl MemoryDiscountRepository {
    pub fn new(book: DiscountBook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Repository seeded with the stock promotional codes.
    pub fn with_default_codes() -> Self {
        Self::new(DiscountBook::with_default_codes())
    }
}

#[async_trait]
impl DiscountRepository for MemoryDiscountRepository {
    async fn find_by_code(&self, code: &str) -> Result<Discount, DataError> {
        let book = self.book.read().await;
        book.find_by_code(code).cloned().ok_or(DataError::NotFound)
    }

    async fn record_usage(&self, code: &str) -> Result<(), DataError> {
        let mut book = self.book.write().await;
        if book.find_by_code(code).is_none() {
            return Err(DataError::NotFound);
        }
        book.mark_used(code);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_normalizes_code() {
        let repo = MemoryDiscountRepository::with_default_codes();
        let d = repo.find_by_code(" welcome10 ").await.unwrap();
        assert_eq!(d.code, "WELCOME10");
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let repo = MemoryDiscountRepository::with_default_codes();
        assert_eq!(repo.find_by_code("NOPE").await, Err(DataError::NotFound));
    }

    #[tokio::test]
    async fn test_record_usage_increments_used_count() {
        let repo = MemoryDiscountRepository::with_default_codes();
        let before = repo.find_by_code("SUMMER2024").await.unwrap().used_count;
        repo.record_usage("SUMMER2024").await.unwrap();
        let after = repo.find_by_code("SUMMER2024").await.unwrap().used_count;
        assert_eq!(after, before + 1);
    }

    #[tokio::test]
    async fn test_record_usage_for_unknown_code_is_not_found() {
        let repo = MemoryDiscountRepository::with_default_codes();
        assert_eq!(repo.record_usage("NOPE").await, Err(DataError::NotFound));
    }
}
