//! # Core Framework Module
//!
//! 서비스 전역에서 공유하는 기반 기능을 제공합니다.
//!
//! - [`registry`] - `inventory` 기반 싱글톤 의존성 주입 컨테이너 (`ServiceLocator`)
//! - [`errors`] - `AppError` / `AppResult` 와 HTTP 응답 변환
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! ServiceLocator::set(Arc::new(database));
//! ServiceLocator::set(Arc::new(redis_client));
//! ServiceLocator::initialize_all().await?;
//!
//! let store_service = StoreService::instance();
//! ```

pub mod registry;
pub mod errors;
