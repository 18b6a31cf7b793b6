//! Product reviews.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId, UserId};

/// Shortest comment accepted, in characters after trimming.
pub const MIN_COMMENT_CHARS: usize = 10;
/// Longest comment accepted.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// A customer review with a 1-5 star rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    /// Display name shown next to the review.
    pub user_name: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub created_at: i64,
}

impl Review {
    /// Creates a review, enforcing the rating range and comment length.
    /// The comment is stored trimmed; length is counted in characters,
    /// not bytes.
    pub fn new(
        product_id: ProductId,
        user_id: UserId,
        rating: u8,
        comment: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        if !(1..=5).contains(&rating) {
            return Err(CommerceError::InvalidRating(rating));
        }
        let comment = comment.into().trim().to_string();
        let chars = comment.chars().count();
        if chars < MIN_COMMENT_CHARS {
            return Err(CommerceError::Validation(format!(
                "comment must be at least {MIN_COMMENT_CHARS} characters"
            )));
        }
        if chars > MAX_COMMENT_CHARS {
            return Err(CommerceError::Validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }

        Ok(Self {
            id: ReviewId::generate(),
            product_id,
            user_id,
            user_name: None,
            rating,
            comment,
            created_at: current_timestamp(),
        })
    }

    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = Some(name.into());
        self
    }
}

/// Mean rating across `reviews`, or `None` when there are none.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u64 = reviews.iter().map(|r| r.rating as u64).sum();
    Some(sum as f64 / reviews.len() as f64)
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
