//! 스토어 API 요청/응답 DTO
//!
//! ```text
//! stores/
//! ├── request/
//! │   ├── store_request.rs   # 생성/수정 폼, 위치, 사진
//! │   └── query.rs           # near / search / page / include_reviews
//! └── response/
//!     └── store_response.rs  # 스토어, 태그 집계, 상위 스토어, 페이지
//! ```

pub mod request;
pub mod response;
