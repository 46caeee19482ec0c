//! # 스토어 리포지토리 구현
//!
//! `stores` 컬렉션의 데이터 액세스 계층입니다.
//! 필터와 집계 파이프라인은 [`pipelines`](super::pipelines)에서 만들고, 여기서는 실행과 캐싱만 담당합니다.
//!
//! ## 인덱스
//!
//! - `slug` 유니크: 동시에 같은 이름으로 생성될 때 마지막 방어선
//! - `name` + `description` 텍스트: `$text` 검색
//! - `location` 2dsphere: `$near` 검색
//! - `created` 내림차순: 목록 정렬

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{debug, info};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    config::StoreQueryConfig,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::dto::stores::response::TagCount,
    domain::entities::stores::store::{Store, TopStore},
    repositories::stores::pipelines,
};

/// 태그 집계 캐시 키
pub const TAGS_CACHE_KEY: &str = "store:tags";
/// 평점 상위 스토어 캐시 키. 리뷰가 추가될 때도 무효화합니다.
pub const TOP_STORES_CACHE_KEY: &str = "store:top";

const DUPLICATE_KEY: i32 = 11000;

/// 유니크 인덱스 위반(E11000) 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn slug_cache_key(slug: &str) -> String {
    format!("store:slug:{}", slug)
}

fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

/// 스토어 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// | 키 | 내용 | 무효화 시점 |
/// |----|------|-------------|
/// | `store:{id}` | 리뷰 없는 스토어 | 수정 |
/// | `store:slug:{slug}` | 리뷰 없는 스토어 | 수정 (이전/새 슬러그 모두) |
/// | `store:tags` | 태그 집계 | 생성, 수정 |
/// | `store:top` | 평점 상위 스토어 | 생성, 수정, 리뷰 작성 |
///
/// 캐시 조회/저장 실패는 무시하고 MongoDB 결과를 그대로 사용합니다.
///
/// ```rust,ignore
/// let repo = StoreRepository::instance();
///
/// let colliding = repo.count_slug_collisions("cafe", None).await?;
/// store.slug = numbered_slug("cafe", colliding, 0);
/// let created = repo.insert(store).await?;
///
/// let found = repo.find_by_slug("cafe").await?;
/// ```
#[repository(name = "store", collection = "stores")]
pub struct StoreRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl StoreRepository {
    /// `base` 또는 `base-N` 슬러그를 가진 스토어 수 (대소문자 무시)
    pub async fn count_slug_collisions(&self, base: &str, exclude: Option<ObjectId>) -> AppResult<u64> {
        self.collection::<Store>()
            .count_documents(pipelines::slug_collision_filter(base, exclude))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 스토어 저장
    ///
    /// # 반환값
    ///
    /// * `Ok(Store)` - `id`가 채워진 스토어
    /// * `Err(AppError::ConflictError)` - 같은 `slug`가 이미 있음 (유니크 인덱스 위반)
    /// * `Err(AppError::DatabaseError)` - 그 외 데이터베이스 오류
    pub async fn insert(&self, mut store: Store) -> AppResult<Store> {
        let result = self.collection::<Store>()
            .insert_one(&store)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("이미 사용 중인 슬러그입니다: {}", store.slug))
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("삽입된 문서의 ID를 읽을 수 없습니다".to_string())
        })?;
        store.id = Some(id);

        info!("스토어 생성: {} ({})", store.slug, id);
        self.invalidate_aggregates().await;

        Ok(store)
    }

    /// 기존 스토어 문서를 통째로 교체합니다.
    ///
    /// `previous_slug`가 주어지면 그 슬러그의 캐시도 지웁니다.
    ///
    /// * `Ok(Some(Store))` - 교체 완료
    /// * `Ok(None)` - 해당 `_id`의 스토어가 없음
    /// * `Err(AppError::ConflictError)` - 새 `slug`가 이미 사용 중
    pub async fn replace(&self, store: Store, previous_slug: Option<&str>) -> AppResult<Option<Store>> {
        let id = store.id.ok_or_else(|| {
            AppError::InternalError("ID 없는 스토어는 교체할 수 없습니다".to_string())
        })?;

        let result = self.collection::<Store>()
            .replace_one(doc! { "_id": id }, &store)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("이미 사용 중인 슬러그입니다: {}", store.slug))
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        info!("스토어 수정: {} ({})", store.slug, id);

        let mut stale = vec![slug_cache_key(&store.slug)];
        if let Some(previous) = previous_slug.filter(|previous| *previous != store.slug) {
            stale.push(slug_cache_key(previous));
        }
        let _ = self.invalidate_cache(&id.to_hex()).await;
        let _ = self.redis.del_multiple(&stale).await;
        self.invalidate_aggregates().await;

        Ok(Some(store))
    }

    /// ID로 스토어 조회 (캐시 키 `store:{id}`)
    ///
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Store>> {
        let object_id = parse_object_id(id)?;
        let cache_key = self.cache_key(id);

        if let Ok(Some(cached)) = self.redis.get::<Store>(&cache_key).await {
            debug!("캐시 적중: {}", cache_key);
            return Ok(Some(cached));
        }

        let store = self.collection::<Store>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref store) = store {
            let _ = self.redis
                .set_with_expiry(&cache_key, store, StoreQueryConfig::cache_ttl_seconds())
                .await;
        }

        Ok(store)
    }

    /// 슬러그로 스토어 조회 (정확히 일치, 캐시 키 `store:slug:{slug}`)
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Store>> {
        let cache_key = slug_cache_key(slug);

        if let Ok(Some(cached)) = self.redis.get::<Store>(&cache_key).await {
            debug!("캐시 적중: {}", cache_key);
            return Ok(Some(cached));
        }

        let store = self.collection::<Store>()
            .find_one(doc! { "slug": slug })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref store) = store {
            let _ = self.redis
                .set_with_expiry(&cache_key, store, StoreQueryConfig::cache_ttl_seconds())
                .await;
        }

        Ok(store)
    }

    /// 최신순 페이지 조회. `(스토어 목록, 전체 개수)`를 반환합니다.
    pub async fn find_page(&self, skip: u64, limit: i64) -> AppResult<(Vec<Store>, u64)> {
        let collection = self.collection::<Store>();

        let stores = collection
            .find(doc! {})
            .sort(doc! { "created": -1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect::<Vec<Store>>()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let count = collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((stores, count))
    }

    /// 태그별 스토어. `tag`가 없으면 태그가 하나라도 있는 모든 스토어.
    pub async fn find_by_tag(&self, tag: Option<&str>) -> AppResult<Vec<Store>> {
        self.collection::<Store>()
            .find(pipelines::tag_filter(tag))
            .sort(doc! { "created": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// `(lng, lat)` 에서 `max_distance` 미터 이내의 스토어, 가까운 순으로 최대 `limit`개
    pub async fn find_nearby(&self, lng: f64, lat: f64, max_distance: f64, limit: i64) -> AppResult<Vec<Store>> {
        self.collection::<Store>()
            .find(pipelines::near_filter(lng, lat, max_distance))
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// `name`, `description` 텍스트 검색. 관련도(`textScore`) 순.
    pub async fn text_search(&self, query: &str, limit: i64) -> AppResult<Vec<Store>> {
        self.collection::<Store>()
            .find(pipelines::text_filter(query))
            .projection(pipelines::text_score())
            .sort(pipelines::text_score())
            .limit(limit)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 태그별 스토어 수, 많은 순 (캐시 키 `store:tags`)
    pub async fn tags_list(&self) -> AppResult<Vec<TagCount>> {
        if let Ok(Some(cached)) = self.redis.get::<Vec<TagCount>>(TAGS_CACHE_KEY).await {
            debug!("캐시 적중: {}", TAGS_CACHE_KEY);
            return Ok(cached);
        }

        let tags = self.aggregate(pipelines::tags_list())
            .await?
            .into_iter()
            .map(mongodb::bson::from_document::<TagCount>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::InternalError(format!("태그 집계 결과 변환 실패: {}", e)))?;

        let _ = self.redis
            .set_with_expiry(TAGS_CACHE_KEY, &tags, StoreQueryConfig::cache_ttl_seconds())
            .await;

        Ok(tags)
    }

    /// 리뷰 2개 이상, 평균 평점 상위 `limit`개 (캐시 키 `store:top`)
    pub async fn top_stores(&self, limit: i64) -> AppResult<Vec<TopStore>> {
        if let Ok(Some(cached)) = self.redis.get::<Vec<TopStore>>(TOP_STORES_CACHE_KEY).await {
            debug!("캐시 적중: {}", TOP_STORES_CACHE_KEY);
            return Ok(cached);
        }

        let stores = self.aggregate(pipelines::top_stores(limit))
            .await?
            .into_iter()
            .map(TopStore::from_document)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::InternalError(format!("평점 집계 결과 변환 실패: {}", e)))?;

        let _ = self.redis
            .set_with_expiry(TOP_STORES_CACHE_KEY, &stores, StoreQueryConfig::cache_ttl_seconds())
            .await;

        Ok(stores)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> AppResult<Vec<Document>> {
        self.collection::<Store>()
            .aggregate(pipeline)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 집계 캐시(태그, 평점 상위)를 지웁니다.
    pub async fn invalidate_aggregates(&self) {
        let keys = [TAGS_CACHE_KEY.to_string(), TOP_STORES_CACHE_KEY.to_string()];
        let _ = self.redis.del_multiple(&keys).await;
    }

    /// `stores` 컬렉션 인덱스 생성 (애플리케이션 시작 시 한 번)
    pub async fn create_indexes(&self) -> AppResult<()> {
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build())
            .build();

        let text_index = IndexModel::builder()
            .keys(doc! { "name": "text", "description": "text" })
            .options(IndexOptions::builder()
                .name("name_description_text".to_string())
                .build())
            .build();

        let location_index = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .options(IndexOptions::builder()
                .name("location_2dsphere".to_string())
                .build())
            .build();

        let created_index = IndexModel::builder()
            .keys(doc! { "created": -1 })
            .options(IndexOptions::builder()
                .name("created_desc".to_string())
                .build())
            .build();

        self.collection::<Store>()
            .create_indexes([slug_index, text_index, location_index, created_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        info!("stores 인덱스 생성 완료");
        Ok(())
    }
}

/// 슬러그 할당 루프가 사용하는 저장소 연산
#[async_trait]
pub trait SlugStore: Send + Sync {
    /// `base` 또는 `base-N` 슬러그 개수 (`exclude`는 제외)
    async fn count_collisions(&self, base: &str, exclude: Option<ObjectId>) -> AppResult<u64>;

    /// `id`가 없으면 삽입, 있으면 교체합니다.
    ///
    /// * `Ok(None)` - 교체할 스토어가 없음
    /// * `Err(AppError::ConflictError)` - 슬러그 유니크 인덱스 위반
    async fn save(&self, store: Store, previous_slug: Option<&str>) -> AppResult<Option<Store>>;
}

#[async_trait]
impl SlugStore for StoreRepository {
    async fn count_collisions(&self, base: &str, exclude: Option<ObjectId>) -> AppResult<u64> {
        self.count_slug_collisions(base, exclude).await
    }

    async fn save(&self, store: Store, previous_slug: Option<&str>) -> AppResult<Option<Store>> {
        match store.id {
            Some(_) => self.replace(store, previous_slug).await,
            None => self.insert(store).await.map(Some),
        }
    }
}
