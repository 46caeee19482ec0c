//! 리뷰 데이터 액세스 계층 ([`review_repo::ReviewRepository`])

pub mod review_repo;
