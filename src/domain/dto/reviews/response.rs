use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::stores::response::store_response::to_utc;
use crate::domain::entities::reviews::review::Review;

/// 리뷰 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: String,
    pub created: DateTime<Utc>,
    pub author: String,
    pub store: String,
    pub text: String,
    pub rating: i32,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.map(|id| id.to_hex()).unwrap_or_default(),
            created: to_utc(review.created),
            author: review.author.to_hex(),
            store: review.store.to_hex(),
            text: review.text,
            rating: review.rating,
        }
    }
}
