//! # 문자열 유틸리티
//!
//! 요청 DTO의 문자열 필드를 다듬는 공통 함수들입니다.
//! 스토어 이름/설명/태그/리뷰 본문은 모두 앞뒤 공백을 제거한 뒤 저장합니다.

use serde::Deserialize;

/// 앞뒤 공백을 제거하고, 비어 있으면 `None`을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 태그 목록을 정리합니다. 각 태그의 공백을 제거하고 빈 태그는 버립니다.
///
/// 순서와 중복은 그대로 유지합니다. (태그 집계는 중복을 그대로 셉니다)
pub fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .filter_map(|tag| clean_optional_string(Some(tag)))
        .collect()
}

/// serde 역직렬화 시 문자열의 앞뒤 공백을 제거합니다.
pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// serde 역직렬화 시 공백 제거 후 빈 문자열을 `None`으로 바꿉니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
