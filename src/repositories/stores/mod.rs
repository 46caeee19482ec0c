//! 스토어 데이터 액세스 계층
//!
//! - [`store_repo::StoreRepository`] - `stores` 컬렉션 CRUD, 조회, 캐싱
//! - [`pipelines`] - 필터/집계 파이프라인 문서 생성
//!
//! ```rust,ignore
//! use crate::repositories::stores::store_repo::StoreRepository;
//!
//! let repo = StoreRepository::instance();
//! let tags = repo.tags_list().await?;
//! ```

pub mod store_repo;
pub mod pipelines;
