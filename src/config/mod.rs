//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 타입이 있는 접근자로 모아 둔 모듈입니다.
//! 모든 접근자는 값이 없거나 파싱에 실패하면 개발 환경에서 안전한 기본값을 사용합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, MongoDB / Redis, Rate Limiting
//! - [`store_config`] - 스토어 조회(근처 검색, 페이지, 캐시)와 사진 업로드 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="delicious_dev"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 스토어 조회
//! export NEARBY_MAX_DISTANCE_METERS="10000"
//! export NEARBY_LIMIT="10"
//! export STORES_PER_PAGE="6"
//! export SEARCH_LIMIT="5"
//! export CACHE_TTL_SECONDS="600"
//!
//! # 사진 업로드
//! export UPLOAD_DIR="./public/uploads"
//! export UPLOAD_MAX_WIDTH="800"
//! export UPLOAD_MAX_PAYLOAD_BYTES="10485760"
//! ```

pub mod data_config;
pub mod store_config;

pub use data_config::*;
pub use store_config::*;

use std::env;
use std::str::FromStr;

/// 환경 변수를 읽어 파싱하고, 없거나 잘못된 값이면 기본값을 사용합니다.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("⚠️ {} 값 파싱 실패 ({}), 기본값 사용", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_missing() {
        assert_eq!(env_or("DELICIOUS_TEST_SURELY_UNSET_KEY", 42u32), 42);
    }
}
