//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들을 제공합니다.
//! MongoDB를 주 저장소로 사용하고 Redis를 통한 캐싱을 지원합니다.
//!
//! 조회 메서드는 `AppResult<Option<T>>`를 반환합니다. 문서가 없는 것은 에러가 아니며,
//! `NotFound`로의 변환은 서비스/핸들러가 담당합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::stores::store_repo::StoreRepository;
//!
//! let store_repo = StoreRepository::instance();
//! let store = store_repo.find_by_slug("cafe").await?;
//! ```

pub mod stores;
pub mod reviews;
