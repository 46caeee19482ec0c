//! 스토어 서비스 ([`store_service::StoreService`])

pub mod store_service;
