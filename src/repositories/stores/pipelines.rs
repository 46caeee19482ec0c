//! # 스토어 조회 쿼리 / 집계 파이프라인
//!
//! MongoDB에 넘기는 필터와 파이프라인 문서를 만드는 순수 함수들입니다.
//! 리포지토리는 여기서 만든 문서를 그대로 실행만 합니다.
//!
//! | 함수 | 용도 |
//! |------|------|
//! | [`slug_collision_filter`] | `base`, `base-N` 슬러그 개수 세기 |
//! | [`near_filter`] | `2dsphere` 인덱스 근처 검색 |
//! | [`text_filter`] | `name`+`description` 텍스트 검색 |
//! | [`tag_filter`] | 태그별 스토어 |
//! | [`tags_list`] | 태그별 스토어 수 집계 |
//! | [`top_stores`] | 리뷰 평균 평점 상위 스토어 집계 |

use mongodb::bson::{doc, oid::ObjectId, Document, Regex};

use crate::utils::slug::collision_pattern;

/// 리뷰 컬렉션 이름 (`$lookup` 대상)
pub const REVIEWS_COLLECTION: &str = "reviews";

/// `base` 또는 `base-N` 슬러그를 가진 스토어 (대소문자 무시)
///
/// 수정 시에는 자기 자신을 `exclude`로 넘겨 충돌 집합에서 뺍니다.
pub fn slug_collision_filter(base: &str, exclude: Option<ObjectId>) -> Document {
    let mut filter = doc! {
        "slug": Regex {
            pattern: collision_pattern(base),
            options: "i".to_string(),
        }
    };
    if let Some(id) = exclude {
        filter.insert("_id", doc! { "$ne": id });
    }
    filter
}

/// `(lng, lat)` 에서 `max_distance` 미터 이내, 가까운 순
pub fn near_filter(lng: f64, lat: f64, max_distance: f64) -> Document {
    doc! {
        "location": {
            "$near": {
                "$geometry": {
                    "type": "Point",
                    "coordinates": [lng, lat],
                },
                "$maxDistance": max_distance,
            }
        }
    }
}

pub fn text_filter(query: &str) -> Document {
    doc! { "$text": { "$search": query } }
}

/// 텍스트 검색 점수. 프로젝션과 정렬에 같은 문서를 사용합니다.
pub fn text_score() -> Document {
    doc! { "score": { "$meta": "textScore" } }
}

/// 태그가 주어지면 그 태그를 가진 스토어, 아니면 태그가 하나라도 있는 스토어
pub fn tag_filter(tag: Option<&str>) -> Document {
    match tag {
        Some(tag) => doc! { "tags": tag },
        None => doc! { "tags": { "$exists": true, "$ne": [] } },
    }
}

/// 태그별 스토어 수, 많은 순
///
/// 한 스토어에 같은 태그가 두 번 있으면 두 번 셉니다.
pub fn tags_list() -> Vec<Document> {
    vec![
        doc! { "$unwind": "$tags" },
        doc! { "$group": { "_id": "$tags", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1, "_id": 1 } },
    ]
}

/// 리뷰가 2개 이상인 스토어를 평균 평점 내림차순으로 `limit`개
pub fn top_stores(limit: i64) -> Vec<Document> {
    vec![
        doc! {
            "$lookup": {
                "from": REVIEWS_COLLECTION,
                "localField": "_id",
                "foreignField": "store",
                "as": "reviews",
            }
        },
        doc! { "$match": { "reviews.1": { "$exists": true } } },
        doc! { "$addFields": { "averageRating": { "$avg": "$reviews.rating" } } },
        doc! { "$sort": { "averageRating": -1 } },
        doc! { "$limit": limit },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage<'a>(pipeline: &'a [Document], name: &str) -> &'a Document {
        pipeline
            .iter()
            .find_map(|s| s.get_document(name).ok())
            .unwrap_or_else(|| panic!("missing stage {}", name))
    }

    #[test]
    fn test_tags_list_stages() {
        let pipeline = tags_list();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline[0].get_str("$unwind").unwrap(), "$tags");

        let group = stage(&pipeline, "$group");
        assert_eq!(group.get_str("_id").unwrap(), "$tags");
        assert_eq!(group.get_document("count").unwrap().get_i32("$sum").unwrap(), 1);

        let sort = stage(&pipeline, "$sort");
        assert_eq!(sort.keys().next().map(String::as_str), Some("count"));
        assert_eq!(sort.get_i32("count").unwrap(), -1);
    }

    #[test]
    fn test_tags_list_counts_every_occurrence() {
        // 스토어별 중복 제거 없이 태그 원소마다 1씩 셈
        assert_eq!(
            tags_list(),
            vec![
                doc! { "$unwind": "$tags" },
                doc! { "$group": { "_id": "$tags", "count": { "$sum": 1 } } },
                doc! { "$sort": { "count": -1, "_id": 1 } },
            ]
        );
    }

    #[test]
    fn test_top_stores_stages() {
        let pipeline = top_stores(10);
        assert_eq!(pipeline.len(), 5);

        let lookup = stage(&pipeline, "$lookup");
        assert_eq!(lookup.get_str("from").unwrap(), "reviews");
        assert_eq!(lookup.get_str("localField").unwrap(), "_id");
        assert_eq!(lookup.get_str("foreignField").unwrap(), "store");
        assert_eq!(lookup.get_str("as").unwrap(), "reviews");

        // 리뷰가 2개 이상 (인덱스 1이 존재)
        let matcher = stage(&pipeline, "$match");
        assert!(matcher.get_document("reviews.1").unwrap().get_bool("$exists").unwrap());

        let add_fields = stage(&pipeline, "$addFields");
        let average = add_fields.get_document("averageRating").unwrap();
        assert_eq!(average.get_str("$avg").unwrap(), "$reviews.rating");

        assert_eq!(stage(&pipeline, "$sort").get_i32("averageRating").unwrap(), -1);
        assert_eq!(pipeline[4].get_i64("$limit").unwrap(), 10);
    }

    #[test]
    fn test_top_stores_filters_before_ranking() {
        let pipeline = top_stores(3);
        let order: Vec<&str> = pipeline
            .iter()
            .filter_map(|stage| stage.keys().next().map(String::as_str))
            .collect();

        // 리뷰 1개짜리 스토어는 정렬/제한 전에 빠져야 함
        assert_eq!(order, vec!["$lookup", "$match", "$addFields", "$sort", "$limit"]);
        assert_eq!(pipeline[1], doc! { "$match": { "reviews.1": { "$exists": true } } });
        assert_eq!(pipeline[3], doc! { "$sort": { "averageRating": -1 } });
        assert_eq!(pipeline[4], doc! { "$limit": 3_i64 });
    }

    #[test]
    fn test_slug_collision_filter() {
        let filter = slug_collision_filter("cafe", None);
        let Some(mongodb::bson::Bson::RegularExpression(regex)) = filter.get("slug") else {
            panic!("slug must be a regex");
        };
        assert_eq!(regex.pattern, "^cafe(-[0-9]+)?$");
        assert_eq!(regex.options, "i");
        assert!(!filter.contains_key("_id"));

        let id = ObjectId::new();
        let filter = slug_collision_filter("cafe", Some(id));
        assert_eq!(filter.get_document("_id").unwrap().get_object_id("$ne").unwrap(), id);
    }

    #[test]
    fn test_near_filter_uses_lng_lat_order() {
        let filter = near_filter(126.9, 37.5, 10_000.0);
        let near = filter.get_document("location").unwrap().get_document("$near").unwrap();
        let geometry = near.get_document("$geometry").unwrap();
        let coordinates = geometry.get_array("coordinates").unwrap();

        assert_eq!(geometry.get_str("type").unwrap(), "Point");
        assert_eq!(coordinates[0].as_f64(), Some(126.9));
        assert_eq!(coordinates[1].as_f64(), Some(37.5));
        assert_eq!(near.get_f64("$maxDistance").unwrap(), 10_000.0);
    }

    #[test]
    fn test_tag_filter() {
        assert_eq!(tag_filter(Some("Wifi")), doc! { "tags": "Wifi" });
        assert!(tag_filter(None).get_document("tags").unwrap().get_bool("$exists").unwrap());
    }
}
