//! # HTTP Handlers
//!
//! actix-web 핸들러 함수들입니다. 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! 에러 응답은 [`AppError`]의 `ResponseError` 구현이 만듭니다.
//!
//! 서비스는 "없음"을 `Ok(None)`으로 돌려주고, 404 변환은 여기서 [`found`]로 합니다.

use crate::core::errors::AppError;

pub mod stores;
pub mod reviews;
pub mod tags;

/// `None`을 `AppError::NotFound`로 바꿉니다.
pub(crate) fn found<T>(value: Option<T>, message: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::NotFound(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_found_maps_missing_to_not_found() {
        assert_eq!(found(Some(1), "x").unwrap(), 1);

        let error = found::<()>(None, "스토어를 찾을 수 없습니다").unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }
}
