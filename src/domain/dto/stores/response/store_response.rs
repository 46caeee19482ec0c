use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use crate::domain::dto::reviews::ReviewResponse;
use crate::domain::entities::reviews::review::Review;
use crate::domain::entities::stores::store::{Location, Store, TopStore};

/// BSON 시각을 UTC chrono 시각으로 변환합니다.
pub(crate) fn to_utc(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// 스토어 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub location: Option<Location>,
    pub photo: Option<String>,
    pub author: String,

    /// `include_reviews`로 요청했을 때만 포함
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,

    /// 평점 상위 스토어 조회에서만 포함
    #[serde(rename = "averageRating", skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl StoreResponse {
    pub fn with_reviews(store: Store, reviews: Option<Vec<Review>>) -> Self {
        let mut response = Self::from(store);
        response.reviews = reviews.map(|reviews| reviews.into_iter().map(ReviewResponse::from).collect());
        response
    }
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        let Store {
            id,
            name,
            slug,
            description,
            tags,
            created,
            location,
            photo,
            author,
        } = store;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            slug,
            description,
            tags,
            created: to_utc(created),
            location,
            photo,
            author: author.to_hex(),
            reviews: None,
            average_rating: None,
        }
    }
}

impl From<TopStore> for StoreResponse {
    fn from(top: TopStore) -> Self {
        let mut response = Self::with_reviews(top.store, Some(top.reviews));
        response.average_rating = Some(top.average_rating);
        response
    }
}

/// 태그별 스토어 수 (`$group` 결과의 `_id`가 태그)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCount {
    #[serde(rename = "_id")]
    pub tag: String,
    pub count: i64,
}

/// 태그 페이지 응답: 전체 태그 집계 + 선택된 태그의 스토어
#[derive(Debug, Clone, Serialize)]
pub struct TagPageResponse {
    pub tag: Option<String>,
    pub tags: Vec<TagCountResponse>,
    pub stores: Vec<StoreResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagCountResponse {
    pub tag: String,
    pub count: i64,
}

impl From<TagCount> for TagCountResponse {
    fn from(value: TagCount) -> Self {
        Self { tag: value.tag, count: value.count }
    }
}

/// 목록 페이지 응답
#[derive(Debug, Clone, Serialize)]
pub struct StorePageResponse {
    pub stores: Vec<StoreResponse>,
    pub page: u64,
    pub pages: u64,
    pub count: u64,
}

impl StorePageResponse {
    pub fn new(stores: Vec<Store>, page: u64, per_page: u64, count: u64) -> Self {
        Self {
            stores: stores.into_iter().map(StoreResponse::from).collect(),
            page,
            pages: page_count(count, per_page),
            count,
        }
    }
}

/// 전체 개수와 페이지 크기로 페이지 수를 계산합니다. (올림)
pub fn page_count(count: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn sample_store() -> Store {
        let mut store = Store::new(
            "Cafe".to_string(),
            Some("조용한 곳".to_string()),
            vec!["Wifi".to_string()],
            Some(Location::point([126.9, 37.5], "서울".to_string())),
            None,
            ObjectId::new(),
        );
        store.id = Some(ObjectId::new());
        store.slug = "cafe".to_string();
        store
    }

    #[test]
    fn test_store_response_omits_reviews_unless_requested() {
        let json = serde_json::to_value(StoreResponse::from(sample_store())).unwrap();
        assert!(json.get("reviews").is_none());
        assert!(json.get("averageRating").is_none());
        assert_eq!(json["slug"], "cafe");
        assert_eq!(json["location"]["type"], "Point");

        let store = sample_store();
        let review = Review::new(ObjectId::new(), store.id.unwrap(), "good".to_string(), 5);
        let json = serde_json::to_value(StoreResponse::with_reviews(store, Some(vec![review]))).unwrap();
        assert_eq!(json["reviews"][0]["rating"], 5);
    }

    #[test]
    fn test_top_store_response_has_average_rating() {
        let top = TopStore { store: sample_store(), reviews: Vec::new(), average_rating: 4.5 };
        let json = serde_json::to_value(StoreResponse::from(top)).unwrap();
        assert_eq!(json["averageRating"], 4.5);
    }

    #[test]
    fn test_tag_count_reads_group_id() {
        let tag: TagCount = bson::from_document(bson::doc! { "_id": "Wifi", "count": 3 }).unwrap();
        assert_eq!(tag, TagCount { tag: "Wifi".to_string(), count: 3 });
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 6), 0);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
        assert_eq!(page_count(7, 0), 0);
    }
}
