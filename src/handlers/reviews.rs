//! # Review HTTP Handlers
//!
//! `POST /api/v1/stores/{id}/reviews` → 201, 스토어가 없으면 404

use actix_web::{web, HttpResponse, post};

use crate::core::errors::AppError;
use crate::domain::dto::reviews::CreateReviewRequest;
use crate::handlers::found;
use crate::services::reviews::review_service::ReviewService;

#[post("/{id}/reviews")]
pub async fn create_review(
    id: web::Path<String>,
    payload: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let service = ReviewService::instance();
    let review = service.create_review(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(found(review, "리뷰를 작성할 스토어를 찾을 수 없습니다")?))
}
