//! Store Entity Implementation
//!
//! 지도에 표시되는 스토어(가게) 엔티티입니다.
//! `location`은 MongoDB GeoJSON Point 형식으로 저장되어 `2dsphere` 인덱스로 근처 검색이 가능합니다.

use mongodb::bson::{self, oid::ObjectId, Bson, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::domain::entities::reviews::review::Review;

/// GeoJSON 타입 값. 스토어 위치는 항상 Point 입니다.
pub const POINT: &str = "Point";

/// 스토어 위치 (GeoJSON Point + 주소)
///
/// 좌표 순서는 GeoJSON 규칙대로 `[경도, 위도]` 입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[lng, lat]`
    pub coordinates: [f64; 2],
    pub address: String,
}

impl Location {
    pub fn point(coordinates: [f64; 2], address: String) -> Self {
        Self {
            kind: POINT.to_string(),
            coordinates,
            address,
        }
    }
}

/// 스토어 엔티티
///
/// `slug`는 이름에서 파생되며 컬렉션 전체에서 유니크합니다.
/// `created`, `author`는 생성 이후 변경되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// 업로드 디렉터리에 저장된 파일 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub author: ObjectId,
}

impl Store {
    /// 아직 저장되지 않은 새 스토어. `slug`는 저장 직전에 채웁니다.
    pub fn new(
        name: String,
        description: Option<String>,
        tags: Vec<String>,
        location: Option<Location>,
        photo: Option<String>,
        author: ObjectId,
    ) -> Self {
        Self {
            id: None,
            name,
            slug: String::new(),
            description,
            tags,
            created: DateTime::now(),
            location,
            photo,
            author,
        }
    }
}

/// 평점 상위 스토어 집계 결과 (`reviews`와 `averageRating`이 붙은 스토어)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopStore {
    pub store: Store,
    pub reviews: Vec<Review>,
    pub average_rating: f64,
}

impl TopStore {
    /// 집계 파이프라인 출력 문서를 분리합니다.
    ///
    /// `reviews`와 `averageRating`을 떼어낸 나머지가 스토어 문서입니다.
    pub fn from_document(mut document: Document) -> Result<Self, bson::de::Error> {
        let reviews = match document.remove("reviews") {
            Some(reviews) => bson::from_bson(reviews)?,
            None => Vec::new(),
        };
        let average_rating = match document.remove("averageRating") {
            Some(Bson::Double(value)) => value,
            Some(Bson::Int32(value)) => f64::from(value),
            Some(Bson::Int64(value)) => value as f64,
            _ => 0.0,
        };
        let store = bson::from_document(document)?;

        Ok(Self { store, reviews, average_rating })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_location_serializes_as_geojson_point() {
        let location = Location::point([126.978, 37.5665], "서울 중구 세종대로 110".to_string());
        let document = bson::to_document(&location).unwrap();

        assert_eq!(document.get_str("type").unwrap(), "Point");
        let coordinates = document.get_array("coordinates").unwrap();
        assert_eq!(coordinates.len(), 2);
        assert_eq!(coordinates[0].as_f64(), Some(126.978));
        assert_eq!(coordinates[1].as_f64(), Some(37.5665));
    }

    #[test]
    fn test_store_document_shape() {
        let author = ObjectId::new();
        let mut store = Store::new(
            "Cafe".to_string(),
            None,
            vec!["Wifi".to_string()],
            None,
            None,
            author,
        );
        store.slug = "cafe".to_string();

        let document = bson::to_document(&store).unwrap();
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("description"));
        assert!(!document.contains_key("photo"));
        assert_eq!(document.get_object_id("author").unwrap(), author);

        let restored: Store = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "name": "Cafe",
            "slug": "cafe",
            "created": DateTime::now(),
            "author": author,
        })
        .unwrap();
        assert!(restored.tags.is_empty());
        assert!(restored.location.is_none());
        assert!(restored.id.is_some());
    }

    #[test]
    fn test_top_store_from_aggregation_document() {
        let store_id = ObjectId::new();
        let author = ObjectId::new();
        let document = doc! {
            "_id": store_id,
            "name": "Cafe",
            "slug": "cafe",
            "tags": ["Wifi"],
            "created": DateTime::now(),
            "author": author,
            "reviews": [
                { "_id": ObjectId::new(), "created": DateTime::now(), "author": author, "store": store_id, "text": "good", "rating": 4 },
                { "_id": ObjectId::new(), "created": DateTime::now(), "author": author, "store": store_id, "text": "great", "rating": 5 }
            ],
            "averageRating": 4.5,
        };

        let top = TopStore::from_document(document).unwrap();
        assert_eq!(top.store.slug, "cafe");
        assert_eq!(top.reviews.len(), 2);
        assert_eq!(top.average_rating, 4.5);
    }
}
