//! 스토어 조회 / 사진 업로드 설정

use std::env;
use std::path::PathBuf;
use super::env_or;

/// 스토어 조회 관련 상수
pub struct StoreQueryConfig;

impl StoreQueryConfig {
    /// 근처 스토어 검색 기본 반경 (미터)
    pub fn nearby_max_distance_meters() -> f64 {
        env_or("NEARBY_MAX_DISTANCE_METERS", 10_000.0)
    }

    /// 근처 스토어 최대 반환 개수
    pub fn nearby_limit() -> i64 {
        env_or("NEARBY_LIMIT", 10)
    }

    /// 목록 페이지당 스토어 수
    pub fn stores_per_page() -> u64 {
        env_or("STORES_PER_PAGE", 6)
    }

    /// 텍스트 검색 최대 반환 개수
    pub fn search_limit() -> i64 {
        env_or("SEARCH_LIMIT", 5)
    }

    /// Redis 캐시 TTL (초)
    pub fn cache_ttl_seconds() -> usize {
        env_or("CACHE_TTL_SECONDS", 600)
    }
}

/// 사진 업로드 설정
pub struct UploadConfig;

impl UploadConfig {
    /// 리사이즈된 이미지가 저장되는 디렉터리
    pub fn upload_dir() -> PathBuf {
        PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "./public/uploads".to_string()))
    }

    /// 리사이즈 최대 너비 (px). 높이는 비율 유지.
    pub fn max_width() -> u32 {
        env_or("UPLOAD_MAX_WIDTH", 800)
    }

    /// JSON 요청 본문 최대 크기 (바이트). base64 사진이 포함되므로 기본 10MiB.
    pub fn max_payload_bytes() -> usize {
        env_or("UPLOAD_MAX_PAYLOAD_BYTES", 10 * 1024 * 1024)
    }
}
