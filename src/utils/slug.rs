//! # 슬러그 생성 유틸리티
//!
//! 스토어 이름에서 URL용 슬러그를 만들고, 같은 슬러그가 이미 있을 때
//! 붙일 번호를 계산합니다.
//!
//! ## 번호 규칙
//!
//! `base` 또는 `base-N` 형태의 기존 슬러그 개수를 `count`라 할 때,
//! `count == 0` 이면 `base`, 아니면 `base-{count + 1}` 입니다.
//!
//! ```text
//! "Cafe" → cafe
//! "Cafe" → cafe-2   (기존: cafe)
//! "Cafe" → cafe-3   (기존: cafe, cafe-2)
//! ```
//!
//! 가장 큰 번호가 아니라 일치 개수를 세기 때문에, 중간 번호가 삭제된 뒤에는
//! 이미 있는 슬러그와 겹칠 수 있습니다. 이 경우 `slug` 유니크 인덱스가 삽입을
//! 거부하고, 리포지토리가 `attempt`를 올려 다시 계산합니다.

/// 이름을 슬러그로 정규화합니다.
///
/// - 소문자로 변환
/// - 글자/숫자가 아닌 문자의 연속은 하이픈 하나로 축약
/// - 앞뒤 하이픈 제거
///
/// 글자/숫자가 하나도 없으면 빈 문자열을 반환합니다.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// `base`, `base-1`, `base-2`, ... 에 일치하는 MongoDB `$regex` 패턴
///
/// 대소문자 무시 옵션(`i`)과 함께 사용합니다.
pub fn collision_pattern(base: &str) -> String {
    format!("^{}(-[0-9]+)?$", regex::escape(base))
}

/// 충돌 개수와 재시도 횟수로 최종 슬러그를 계산합니다.
///
/// `attempt`는 유니크 인덱스 위반으로 다시 시도할 때마다 1씩 증가합니다.
pub fn numbered_slug(base: &str, colliding: u64, attempt: u32) -> String {
    let taken = colliding + u64::from(attempt);
    if taken == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, taken + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn count_collisions(existing: &[String], base: &str) -> u64 {
        let pattern = RegexBuilder::new(&collision_pattern(base))
            .case_insensitive(true)
            .build()
            .unwrap();
        existing.iter().filter(|s| pattern.is_match(s)).count() as u64
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Cafe"), "cafe");
        assert_eq!(slugify("  Joe's Coffee & Tea!! "), "joe-s-coffee-tea");
        assert_eq!(slugify("Wine---Bar"), "wine-bar");
        assert_eq!(slugify("Store 24/7"), "store-24-7");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("서울 커피"), "서울-커피");
        assert_eq!(slugify("Ölbar Zürich"), "ölbar-zürich");
    }

    #[test]
    fn test_slugify_without_alphanumerics_is_empty() {
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_output_is_normalized() {
        for name in ["A  B", "-Lead", "Trail-", "MiXeD CaSe", "a_b.c"] {
            let slug = slugify(name);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{}", slug);
            assert!(!slug.contains("--"), "{}", slug);
            assert_eq!(slug, slug.to_lowercase());
            assert!(slug.chars().all(|c| c.is_alphanumeric() || c == '-'));
        }
    }

    #[test]
    fn test_collision_pattern_matches_numbered_variants_only() {
        let existing: Vec<String> = ["cafe", "cafe-2", "cafe-10", "cafeteria", "my-cafe", "cafe-", "CAFE-3"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(count_collisions(&existing, "cafe"), 4);
    }

    #[test]
    fn test_collision_pattern_escapes_regex_metacharacters() {
        let pattern = collision_pattern("c.b");
        let re = regex::Regex::new(&pattern).unwrap();
        assert!(re.is_match("c.b-2"));
        assert!(!re.is_match("cxb"));
    }

    #[test]
    fn test_same_name_three_times_numbers_sequentially() {
        let mut existing: Vec<String> = Vec::new();

        for expected in ["cafe", "cafe-2", "cafe-3"] {
            let base = slugify("Cafe");
            let slug = numbered_slug(&base, count_collisions(&existing, &base), 0);
            assert_eq!(slug, expected);
            existing.push(slug);
        }
    }

    #[test]
    fn test_retry_bumps_suffix() {
        // cafe-2 가 삭제되어 cafe, cafe-3 만 남은 경우
        assert_eq!(numbered_slug("cafe", 2, 0), "cafe-3");
        assert_eq!(numbered_slug("cafe", 2, 1), "cafe-4");
        // 동시에 만들어진 첫 번째 cafe 와 경합한 경우
        assert_eq!(numbered_slug("cafe", 0, 1), "cafe-2");
    }
}
