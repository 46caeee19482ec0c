//! # Application Error Handling
//!
//! 스토어 디렉터리 서비스 전역에서 사용하는 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 만으로 적절한 HTTP 응답이 만들어지도록 합니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 단일 메시지 검증 실패 |
//! | `FieldValidation` | 400 Bad Request | 필드별 검증 실패 (`validator`) |
//! | `NotFound` | 404 Not Found | 존재하지 않는 ID / 슬러그 |
//! | `ConflictError` | 409 Conflict | 슬러그 유니크 충돌 재시도 소진 |
//! | `UnsupportedMedia` | 415 Unsupported Media Type | 이미지가 아닌 업로드 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | 캐시 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 리포지토리의 단건 조회는 `Result<Option<T>, AppError>`를 반환합니다.
//! "없음"은 에러가 아니라 값이며, HTTP 경계에서만 `NotFound`로 바뀝니다.

use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연산 실패 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 연산 실패 (500)
    ///
    /// 캐시는 보조 저장소이므로 리포지토리에서는 대부분 무시되고,
    /// 명시적으로 캐시를 다루는 경로에서만 전파됩니다.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 실패 (400)
    ///
    /// 필드 단위로 표현하기 어려운 검증 실패에 사용합니다.
    /// (예: 이름이 슬러그로 변환되면 빈 문자열이 되는 경우)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 필드별 입력값 검증 실패 (400)
    ///
    /// `validator` 크레이트의 에러를 그대로 보존하여
    /// 응답 본문에 필드별 메시지를 담습니다.
    #[error("Validation error: {0}")]
    FieldValidation(#[from] ValidationErrors),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌 (409)
    ///
    /// 동시에 같은 이름의 스토어가 생성되어 슬러그 재시도가 모두 실패한 경우입니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 지원하지 않는 업로드 미디어 타입 (415)
    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 검증 에러를 `필드 → 메시지 목록` 형태로 펼칩니다.
    ///
    /// 중첩 구조체(`location.address` 등)는 점 표기법으로 평탄화합니다.
    pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
        let mut out = BTreeMap::new();
        collect_field_messages(errors, None, &mut out);
        out
    }
}

fn collect_field_messages(
    errors: &ValidationErrors,
    prefix: Option<&str>,
    out: &mut BTreeMap<String, Vec<String>>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = list
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>();
                out.entry(path).or_insert_with(Vec::new).extend(messages);
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_field_messages(inner, Some(&path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_field_messages(inner, Some(&item_path), out);
                }
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::FieldValidation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{"error": "..."}` 형식의 JSON 응답을 생성합니다.
    ///
    /// 필드 검증 에러는 `fields` 키에 필드별 메시지를 추가로 담습니다.
    /// 5xx 에러는 내부 정보를 노출하지 않도록 메시지를 로그로만 남깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let body = match self {
            AppError::FieldValidation(errors) => serde_json::json!({
                "error": "입력값이 올바르지 않습니다",
                "fields": AppError::field_messages(errors),
            }),
            _ if status.is_server_error() => {
                log::error!("❌ {}", self);
                serde_json::json!({ "error": "서버 내부 오류가 발생했습니다" })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        actix_web::HttpResponse::build(status).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("이름은 필수입니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("스토어를 찾을 수 없습니다".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("slug".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unsupported_media_response() {
        let error = AppError::UnsupportedMedia("application/pdf".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_database_error_is_internal() {
        let error = AppError::DatabaseError("connection reset".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_field_messages_flatten_nested() {
        use validator::Validate;

        #[derive(Validate)]
        struct Inner {
            #[validate(length(min = 1, message = "주소를 입력해주세요"))]
            address: String,
        }

        #[derive(Validate)]
        struct Outer {
            #[validate(length(min = 1))]
            name: String,
            #[validate(nested)]
            location: Inner,
        }

        let outer = Outer {
            name: String::new(),
            location: Inner { address: String::new() },
        };
        let errors = outer.validate().unwrap_err();

        let messages = AppError::field_messages(&errors);
        assert_eq!(messages.get("name"), Some(&vec!["length".to_string()]));
        assert_eq!(
            messages.get("location.address"),
            Some(&vec!["주소를 입력해주세요".to_string()])
        );

        let error = AppError::from(errors);
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }
}
