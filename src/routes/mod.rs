//! # 라우트 설정
//!
//! 모든 HTTP 엔드포인트를 한곳에서 등록합니다.
//!
//! ```text
//! /health
//! /api/v1/stores        목록, 생성, near, search, id/{id}, slug/{slug}, {id}, {id}/reviews
//! /api/v1/tags          태그 집계, tags/{tag}
//! /api/v1/top           평점 상위 스토어
//! ```
//!
//! `/api/v1/stores` 스코프 안에서는 고정 경로(`/near`, `/search`)를 `/{id}`보다 먼저 등록합니다.

use crate::config::UploadConfig;
use crate::core::errors::AppError;
use crate::handlers;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(health_check);

    configure_store_routes(cfg);
    configure_tag_routes(cfg);
}

fn configure_store_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stores")
            .service(handlers::stores::list_stores)
            .service(handlers::stores::create_store)
            .service(handlers::stores::find_nearby)
            .service(handlers::stores::search_stores)
            .service(handlers::stores::get_store_by_id)
            .service(handlers::stores::get_store_by_slug)
            .service(handlers::stores::update_store)
            .service(handlers::reviews::create_review)
    );
}

fn configure_tag_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tags")
            .service(handlers::tags::list_tags)
            .service(handlers::tags::stores_by_tag)
    );

    cfg.service(handlers::tags::top_stores);
}

/// 본문 크기 제한과 JSON 파싱 실패 응답 (400, `{"error": ...}`)
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(UploadConfig::max_payload_bytes())
        .error_handler(|err, _req| AppError::ValidationError(format!("잘못된 요청 본문입니다: {}", err)).into())
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "delicious_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "delicious_backend");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        #[actix_web::post("/echo")]
        async fn echo(body: web::Json<serde_json::Value>) -> actix_web::HttpResponse {
            actix_web::HttpResponse::Ok().json(body.into_inner())
        }

        let app = test::init_service(App::new().app_data(json_config()).service(echo)).await;
        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
