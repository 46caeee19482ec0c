//! 캐싱 계층 모듈
//!
//! Redis 기반 JSON 캐시를 제공합니다. 캐시는 보조 저장소이므로
//! 리포지토리는 캐시 실패를 요청 실패로 전파하지 않습니다.
//!
//! # 캐시 키
//!
//! | 키 | 값 |
//! |----|----|
//! | `store:{id}` | 리뷰 없는 스토어 단건 |
//! | `store:slug:{slug}` | 리뷰 없는 스토어 단건 |
//! | `store:tags` | 태그별 스토어 수 |
//! | `store:top` | 평점 상위 스토어 |
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
