//! 스토어 조회용 쿼리 스트링 DTO

use serde::Deserialize;
use validator::Validate;

/// `GET /api/v1/stores/near?lat=&lng=&max_distance=`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NearQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "위도는 -90 ~ 90 사이여야 합니다"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "경도는 -180 ~ 180 사이여야 합니다"))]
    pub lng: f64,

    /// 미터 단위. 없으면 `NEARBY_MAX_DISTANCE_METERS`
    #[validate(range(min = 0.0, message = "거리는 0 이상이어야 합니다"))]
    pub max_distance: Option<f64>,
}

/// `GET /api/v1/stores/search?q=`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/v1/stores?page=N` (1부터 시작)
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// `?include_reviews=true|false`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsQuery {
    pub include_reviews: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_query_ranges() {
        let ok = NearQuery { lat: 37.5, lng: 126.9, max_distance: Some(500.0) };
        assert!(ok.validate().is_ok());

        let bad = NearQuery { lat: 95.0, lng: 126.9, max_distance: None };
        assert!(bad.validate().is_err());

        let negative = NearQuery { lat: 0.0, lng: 0.0, max_distance: Some(-1.0) };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_page_defaults_to_first() {
        assert_eq!(PageQuery { page: None }.page(), 1);
        assert_eq!(PageQuery { page: Some(0) }.page(), 1);
        assert_eq!(PageQuery { page: Some(3) }.page(), 3);
    }
}
