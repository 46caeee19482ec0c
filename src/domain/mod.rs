//! # Domain Layer Module
//!
//! 스토어 디렉터리의 도메인 타입을 모아 둔 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - MongoDB 문서 (Store, Review, TopStore)
//! └── dto        - HTTP 요청/응답 (StoreRequest, StoreResponse, ...)
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db, caching)
//! ```
//!
//! 엔티티는 저장 형식을 그대로 따르고(`_id`, `ObjectId`, BSON 시각),
//! DTO는 클라이언트용 형식(16진수 ID 문자열, RFC 3339 시각)을 사용합니다.

pub mod entities;
pub mod dto;
