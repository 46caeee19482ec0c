//! # 리뷰 서비스 구현

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use validator::Validate;

use crate::{
    core::errors::{AppError, AppResult},
    domain::dto::reviews::{CreateReviewRequest, ReviewResponse},
    domain::entities::reviews::review::Review,
    repositories::reviews::review_repo::ReviewRepository,
    repositories::stores::store_repo::StoreRepository,
};

/// 리뷰 작성 서비스
///
/// 대상 스토어가 없으면 `Ok(None)`을 돌려주고, 핸들러가 404로 바꿉니다.
#[service(name = "review")]
pub struct ReviewService {
    review_repo: Arc<ReviewRepository>,
    store_repo: Arc<StoreRepository>,
}

impl ReviewService {
    pub async fn create_review(&self, store_id: &str, request: CreateReviewRequest) -> AppResult<Option<ReviewResponse>> {
        request.validate()?;

        let Some(store) = self.store_repo.find_by_id(store_id).await? else {
            return Ok(None);
        };
        let store_id = store.id.ok_or_else(|| {
            AppError::InternalError("저장된 스토어에 ID가 없습니다".to_string())
        })?;
        let author = ObjectId::parse_str(&request.author)
            .map_err(|_| AppError::ValidationError("유효하지 않은 작성자 ID입니다".to_string()))?;

        let review = Review::new(author, store_id, request.text, request.rating);
        let created = self.review_repo.create(review).await?;

        Ok(Some(ReviewResponse::from(created)))
    }
}
