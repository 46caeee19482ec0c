//! 리뷰 엔티티

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 스토어에 달린 리뷰. `rating`은 1~5 정수입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub created: DateTime,
    pub author: ObjectId,
    /// 대상 스토어 `_id`
    pub store: ObjectId,
    pub text: String,
    pub rating: i32,
}

impl Review {
    pub fn new(author: ObjectId, store: ObjectId, text: String, rating: i32) -> Self {
        Self {
            id: None,
            created: DateTime::now(),
            author,
            store,
            text,
            rating,
        }
    }
}
