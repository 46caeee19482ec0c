use serde::Deserialize;
use validator::Validate;

use crate::domain::dto::stores::request::store_request::validate_object_id;
use crate::utils::string_utils::deserialize_trimmed_string;

/// 리뷰 작성 요청 DTO (`POST /api/v1/stores/{id}/reviews`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// 작성자 User `_id`
    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(custom(function = "validate_object_id"))]
    pub author: String,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, max = 2000, message = "리뷰 내용은 1-2000자 사이여야 합니다"))]
    pub text: String,

    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_validation() {
        let ok: CreateReviewRequest = serde_json::from_str(
            r#"{ "author": "65f1c0a2e4b0a1b2c3d4e5f6", "text": " 맛있어요 ", "rating": 5 }"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());
        assert_eq!(ok.text, "맛있어요");

        let bad_rating: CreateReviewRequest = serde_json::from_str(
            r#"{ "author": "65f1c0a2e4b0a1b2c3d4e5f6", "text": "별로", "rating": 6 }"#,
        )
        .unwrap();
        assert!(bad_rating.validate().unwrap_err().field_errors().contains_key("rating"));

        let blank_text: CreateReviewRequest = serde_json::from_str(
            r#"{ "author": "65f1c0a2e4b0a1b2c3d4e5f6", "text": "   ", "rating": 3 }"#,
        )
        .unwrap();
        assert!(blank_text.validate().unwrap_err().field_errors().contains_key("text"));
    }

    #[test]
    fn test_missing_author_is_rejected() {
        let req: CreateReviewRequest = serde_json::from_str(r#"{ "text": "good", "rating": 4 }"#).unwrap();
        assert!(req.validate().unwrap_err().field_errors().contains_key("author"));
    }
}
