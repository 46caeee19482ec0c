//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 입력 문자열 정리 (trim, 빈 값 제거, 태그 정리)
//! - [`slug`] - 스토어 이름 → 슬러그 정규화와 충돌 번호 계산
//!
//! ```rust,ignore
//! use crate::utils::slug::{slugify, numbered_slug};
//!
//! let base = slugify("Joe's Cafe");        // "joe-s-cafe"
//! let slug = numbered_slug(&base, 1, 0);    // "joe-s-cafe-2"
//! ```

pub mod string_utils;
pub mod slug;
