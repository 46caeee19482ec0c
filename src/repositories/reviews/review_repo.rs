//! # 리뷰 리포지토리 구현
//!
//! `reviews` 컬렉션의 데이터 액세스 계층입니다.
//! 리뷰가 추가되면 평점 상위 스토어 집계가 바뀌므로 `store:top` 캐시를 지웁니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use log::info;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::reviews::review::Review,
    repositories::stores::store_repo::TOP_STORES_CACHE_KEY,
};

/// 리뷰 데이터 액세스 리포지토리
///
/// ```rust,ignore
/// let repo = ReviewRepository::instance();
/// let review = repo.create(Review::new(author, store_id, "맛있어요".to_string(), 5)).await?;
/// let reviews = repo.find_by_store(&store_id).await?;
/// ```
#[repository(name = "review", collection = "reviews")]
pub struct ReviewRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl ReviewRepository {
    /// 새 리뷰 저장
    pub async fn create(&self, mut review: Review) -> AppResult<Review> {
        let result = self.collection::<Review>()
            .insert_one(&review)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("삽입된 문서의 ID를 읽을 수 없습니다".to_string())
        })?;
        review.id = Some(id);

        info!("리뷰 생성: store={} rating={}", review.store, review.rating);
        let _ = self.redis.del(TOP_STORES_CACHE_KEY).await;

        Ok(review)
    }

    /// 스토어의 리뷰 목록, 최신순
    pub async fn find_by_store(&self, store_id: &ObjectId) -> AppResult<Vec<Review>> {
        self.collection::<Review>()
            .find(doc! { "store": store_id })
            .sort(doc! { "created": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// `reviews` 컬렉션 인덱스 생성
    pub async fn create_indexes(&self) -> AppResult<()> {
        let store_index = IndexModel::builder()
            .keys(doc! { "store": 1, "created": -1 })
            .options(IndexOptions::builder()
                .name("store_created".to_string())
                .build())
            .build();

        self.collection::<Review>()
            .create_indexes([store_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("reviews 인덱스 생성 완료");
        Ok(())
    }
}
