//! 비즈니스 로직을 담당하는 서비스 모듈
//!
//! 리포지토리를 조합해 유스케이스를 구현합니다.
//!
//! - [`stores`] - 스토어 생성/수정(검증 → 슬러그 → 저장), 조회, 태그/평점 집계
//! - [`reviews`] - 리뷰 작성
//! - [`uploads`] - 사진 디코딩/리사이즈/저장
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::stores::store_service::StoreService;
//!
//! let store_service = StoreService::instance();
//! let page = store_service.list_stores(1).await?;
//! ```

pub mod stores;
pub mod reviews;
pub mod uploads;
