//! 스토어 디렉터리 백엔드
//!
//! 위치 정보가 있는 스토어를 등록하고, 태그/근처/텍스트로 찾고,
//! 리뷰 평점 집계를 보여주는 JSON API 서비스입니다.
//! 조회, 인덱싱, 지리 검색, 집계는 모두 MongoDB에 맡깁니다.
//!
//! # Features
//!
//! - **스토어 관리**: 생성/수정, 이름 기반 유니크 슬러그 (`cafe`, `cafe-2`, ...)
//! - **검색**: 태그별, 근처(`2dsphere`), 텍스트(`$text`)
//! - **집계**: 태그별 스토어 수, 리뷰 평균 평점 상위 스토어
//! - **사진 업로드**: base64 이미지 → 리사이즈 → 업로드 디렉터리
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//! - **MongoDB**: 스토어/리뷰 저장
//! - **Redis**: 단건 조회와 집계 결과 캐싱
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, None → 404
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 검증 → 슬러그 → 저장, 업로드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스, 집계 파이프라인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use delicious_backend::services::stores::store_service::StoreService;
//!
//! let store_service = StoreService::instance();
//!
//! let created = store_service.create_store(request).await?;
//! let top = store_service.top_stores().await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
