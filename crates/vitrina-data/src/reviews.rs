//! Review repository.

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitrina_commerce::review::Review;
use vitrina_commerce::{ProductId, ReviewId};

use crate::error::DataError;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reviews for `product_id`, newest first.
    async fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, DataError>;

    /// Stores a review. Each user gets one review per product; a
    /// second one is rejected with [`DataError::UniqueViolation`].
    async fn insert(&self, review: Review) -> Result<ReviewId, DataError>;
}

#[derive(Default)]
pub struct MemoryReviewRepository {
    reviews: RwLock<Vec<Review>>,
}

impl MemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, DataError> {
        let reviews = self.reviews.read().await;
        let mut own: Vec<Review> = reviews
            .iter()
            .filter(|r| &r.product_id == product_id)
            .cloned()
            .collect();
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(own)
    }

    async fn insert(&self, review: Review) -> Result<ReviewId, DataError> {
        let mut reviews = self.reviews.write().await;
        let duplicate = reviews
            .iter()
            .any(|r| r.product_id == review.product_id && r.user_id == review.user_id);
        if duplicate {
            return Err(DataError::UniqueViolation);
        }
        let id = review.id.clone();
        reviews.push(review);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrina_commerce::UserId;

    fn review(product: &str, user: &str, rating: u8) -> Review {
        Review::new(
            ProductId::from(product),
            UserId::from(user),
            rating,
            "Detailed enough impressions of the product.",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let repo = MemoryReviewRepository::new();
        repo.insert(review("p1", "anna", 5)).await.unwrap();
        repo.insert(review("p2", "anna", 3)).await.unwrap();

        let listed = repo.list_for_product(&ProductId::from("p1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].rating, 5);
    }

    #[tokio::test]
    async fn test_second_review_by_same_user_is_rejected() {
        let repo = MemoryReviewRepository::new();
        repo.insert(review("p1", "anna", 5)).await.unwrap();
        assert_eq!(
            repo.insert(review("p1", "anna", 1)).await,
            Err(DataError::UniqueViolation)
        );
    }

    #[tokio::test]
    async fn test_different_users_can_review_same_product() {
        let repo = MemoryReviewRepository::new();
        repo.insert(review("p1", "anna", 5)).await.unwrap();
        repo.insert(review("p1", "boris", 2)).await.unwrap();

        let listed = repo.list_for_product(&ProductId::from("p1")).await.unwrap();
        assert_eq!(listed.len(), 2);
    }
}
