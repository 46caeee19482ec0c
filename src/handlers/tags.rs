//! # Tag / Top Store HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/api/v1/tags` | 태그 집계 + 태그가 있는 모든 스토어 |
//! | `GET` | `/api/v1/tags/{tag}` | 태그 집계 + 해당 태그 스토어 |
//! | `GET` | `/api/v1/top` | 리뷰 평균 평점 상위 스토어 |

use actix_web::{web, HttpResponse, get};

use crate::core::errors::AppError;
use crate::services::stores::store_service::StoreService;

#[get("")]
pub async fn list_tags() -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let page = service.tag_page(None).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/{tag}")]
pub async fn stores_by_tag(
    tag: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let page = service.tag_page(Some(tag.into_inner())).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/api/v1/top")]
pub async fn top_stores() -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let stores = service.top_stores().await?;

    Ok(HttpResponse::Ok().json(stores))
}
