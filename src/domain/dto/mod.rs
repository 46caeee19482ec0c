//! # Data Transfer Objects Module
//!
//! API 경계에서 주고받는 JSON 구조입니다.
//!
//! | 모듈 | 요청 | 응답 |
//! |------|------|------|
//! | [`stores`] | `StoreRequest`, `NearQuery`, `SearchQuery`, `PageQuery` | `StoreResponse`, `StorePageResponse`, `TagPageResponse` |
//! | [`reviews`] | `CreateReviewRequest` | `ReviewResponse` |
//!
//! 요청 DTO는 `validator::Validate`를 구현하며, 핸들러나 서비스에서
//! `validate()` 결과를 `AppError::FieldValidation`으로 변환합니다.

pub mod stores;
pub mod reviews;
