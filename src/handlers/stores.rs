//! # Store HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/v1/stores?page=N` | 최신순 목록 | 200 |
//! | `POST` | `/api/v1/stores` | 스토어 생성 (사진 선택) | 201 |
//! | `GET` | `/api/v1/stores/near?lat=&lng=&max_distance=` | 근처 스토어 | 200 |
//! | `GET` | `/api/v1/stores/search?q=` | 텍스트 검색 | 200 |
//! | `GET` | `/api/v1/stores/id/{id}` | ID 조회 (`include_reviews` 기본 false) | 200 / 404 |
//! | `GET` | `/api/v1/stores/slug/{slug}` | 슬러그 조회 (`include_reviews` 기본 true) | 200 / 404 |
//! | `PUT` | `/api/v1/stores/{id}` | 스토어 수정 | 200 / 404 |

use actix_web::{web, HttpResponse, get, post, put};

use crate::core::errors::AppError;
use crate::domain::dto::stores::request::{NearQuery, PageQuery, ReviewsQuery, SearchQuery, StoreRequest};
use crate::handlers::found;
use crate::services::stores::store_service::StoreService;

#[get("")]
pub async fn list_stores(
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let page = service.list_stores(query.page()).await?;

    Ok(HttpResponse::Ok().json(page))
}

#[post("")]
pub async fn create_store(
    payload: web::Json<StoreRequest>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let store = service.create_store(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(store))
}

#[get("/near")]
pub async fn find_nearby(
    query: web::Query<NearQuery>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let stores = service.find_nearby(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(stores))
}

#[get("/search")]
pub async fn search_stores(
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let stores = service.search(&query.q).await?;

    Ok(HttpResponse::Ok().json(stores))
}

#[get("/id/{id}")]
pub async fn get_store_by_id(
    id: web::Path<String>,
    query: web::Query<ReviewsQuery>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let include_reviews = query.include_reviews.unwrap_or(false);
    let store = service.find_by_id(&id, include_reviews).await?;

    Ok(HttpResponse::Ok().json(found(store, "스토어를 찾을 수 없습니다")?))
}

#[get("/slug/{slug}")]
pub async fn get_store_by_slug(
    slug: web::Path<String>,
    query: web::Query<ReviewsQuery>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let include_reviews = query.include_reviews.unwrap_or(true);
    let store = service.find_by_slug(&slug, include_reviews).await?;

    Ok(HttpResponse::Ok().json(found(store, "스토어를 찾을 수 없습니다")?))
}

#[put("/{id}")]
pub async fn update_store(
    id: web::Path<String>,
    payload: web::Json<StoreRequest>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let store = service.update_store(&id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(found(store, "스토어를 찾을 수 없습니다")?))
}
