//! 스토어 생성/수정 요청 DTO
//!
//! 생성(`POST /api/v1/stores`)과 수정(`PUT /api/v1/stores/{id}`)이 같은 폼을 사용합니다.
//! 문자열 필드는 역직렬화 단계에서 trim 되고, 검증은 [`Validate`]로 수행합니다.
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entities::stores::store::{Location, POINT};
use crate::utils::string_utils::{deserialize_optional_string, deserialize_trimmed_string};

/// 스토어 생성/수정 폼
///
/// ```json
/// {
///   "author": "65f1c0a2e4b0a1b2c3d4e5f6",
///   "name": "Joe's Cafe",
///   "description": "조용한 카페",
///   "tags": ["Wifi", "Open Late"],
///   "location": { "coordinates": [126.978, 37.5665], "address": "서울 중구 세종대로 110" },
///   "photo": { "mime_type": "image/jpeg", "data": "<base64>" }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StoreRequest {
    /// 작성자 User `_id` (생성 시 필수, 수정 시 무시)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_object_id"))]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, max = 200, message = "스토어 이름은 1-200자 사이여야 합니다"))]
    #[validate(custom(function = "validate_sluggable_name"))]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "설명은 5000자를 넘을 수 없습니다"))]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub location: Option<LocationRequest>,

    #[serde(default)]
    #[validate(nested)]
    pub photo: Option<PhotoUpload>,
}

impl StoreRequest {
    /// 수정 시 위치 타입은 클라이언트 값과 무관하게 Point 로 고정합니다.
    pub fn force_point_location(&mut self) {
        if let Some(location) = self.location.as_mut() {
            location.kind = Some(POINT.to_string());
        }
    }

    /// `author` 문자열을 ObjectId 로 변환합니다. 형식 검증은 [`Validate`]가 먼저 수행합니다.
    pub fn author_id(&self) -> Option<ObjectId> {
        self.author
            .as_deref()
            .and_then(|author| ObjectId::parse_str(author).ok())
    }
}

/// 위치 입력. 좌표와 주소가 모두 있어야 합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LocationRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    /// `[lng, lat]`
    #[serde(default)]
    #[validate(required(message = "좌표를 입력해주세요"))]
    #[validate(custom(function = "validate_coordinates"))]
    pub coordinates: Option<[f64; 2]>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(required(message = "주소를 입력해주세요"))]
    pub address: Option<String>,
}

impl LocationRequest {
    /// 검증을 통과한 입력을 GeoJSON Point 로 변환합니다.
    pub fn into_location(self) -> Option<Location> {
        match (self.coordinates, self.address) {
            (Some(coordinates), Some(address)) => Some(Location::point(coordinates, address)),
            _ => None,
        }
    }
}

/// base64 로 인코딩된 사진
///
/// `data`는 순수 base64 또는 `data:image/png;base64,...` 형식의 data URL 입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PhotoUpload {
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, message = "MIME 타입을 입력해주세요"))]
    pub mime_type: String,

    #[validate(length(min = 1, message = "사진 데이터가 비어 있습니다"))]
    pub data: String,
}

pub(crate) fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if ObjectId::parse_str(value).is_err() {
        return Err(ValidationError::new("invalid_object_id")
            .with_message("유효하지 않은 ID 형식입니다".into()));
    }
    Ok(())
}

/// 이름에 글자/숫자가 하나도 없으면 슬러그를 만들 수 없습니다.
fn validate_sluggable_name(name: &str) -> Result<(), ValidationError> {
    if !name.is_empty() && !name.chars().any(char::is_alphanumeric) {
        return Err(ValidationError::new("unsluggable_name")
            .with_message("스토어 이름에는 글자나 숫자가 포함되어야 합니다".into()));
    }
    Ok(())
}

/// 경도 [-180, 180], 위도 [-90, 90]
fn validate_coordinates(coordinates: &[f64; 2]) -> Result<(), ValidationError> {
    let [lng, lat] = *coordinates;

    if !(-180.0..=180.0).contains(&lng) {
        return Err(ValidationError::new("invalid_longitude")
            .with_message("경도는 -180 ~ 180 사이여야 합니다".into()));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::new("invalid_latitude")
            .with_message("위도는 -90 ~ 90 사이여야 합니다".into()));
    }
    Ok(())
}
