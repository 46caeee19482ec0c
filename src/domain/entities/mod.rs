//! 도메인 엔티티
//!
//! MongoDB 컬렉션에 그대로 저장되는 문서 구조입니다.
//!
//! | 엔티티 | 컬렉션 |
//! |--------|--------|
//! | [`stores::store::Store`] | `stores` |
//! | [`reviews::review::Review`] | `reviews` |

pub mod stores;
pub mod reviews;
