//! # 스토어 서비스 구현
//!
//! 스토어 생성/수정의 세 단계(검증 → 슬러그 결정 → 저장)와 조회 유스케이스를 담당합니다.
//!
//! ## 슬러그 결정
//!
//! 1. `slugify(name)`으로 기본 슬러그를 만듭니다.
//! 2. `base` / `base-N` 슬러그 개수를 세어 번호를 붙입니다.
//! 3. 저장 중 유니크 인덱스 위반이 나면 번호를 하나 올려 최대 [`MAX_SLUG_ATTEMPTS`]번 다시 시도합니다.
//!
//! 수정 시에는 이름(trim 후)이 바뀐 경우에만 슬러그를 다시 계산하고,
//! 충돌 집합에서 자기 자신을 제외합니다.

use std::sync::Arc;

use futures_util::future::try_join;
use log::{info, warn};
use singleton_macro::service;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    config::StoreQueryConfig,
    core::errors::{AppError, AppResult},
    domain::dto::stores::request::{NearQuery, StoreRequest},
    domain::dto::stores::response::{
        StorePageResponse, StoreResponse, TagCountResponse, TagPageResponse,
    },
    domain::entities::stores::store::Store,
    repositories::reviews::review_repo::ReviewRepository,
    repositories::stores::store_repo::{SlugStore, StoreRepository},
    services::uploads::upload_service::UploadService,
    utils::slug::{numbered_slug, slugify},
    utils::string_utils::clean_tags,
};

/// 유니크 인덱스 위반 시 슬러그 재시도 횟수
pub const MAX_SLUG_ATTEMPTS: u32 = 5;

/// 평점 상위 스토어 개수
pub const TOP_STORES_LIMIT: i64 = 10;

/// 이름에서 기본 슬러그를 만듭니다. 비어 있으면 검증 오류입니다.
fn slug_base(name: &str) -> AppResult<String> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(AppError::ValidationError(
            "스토어 이름으로 슬러그를 만들 수 없습니다".to_string(),
        ));
    }
    Ok(base)
}

/// trim 한 이름이 달라졌을 때만 슬러그를 다시 계산합니다.
pub(crate) fn slug_needs_recompute(stored_name: &str, requested_name: &str) -> bool {
    stored_name.trim() != requested_name.trim()
}

/// 수정 요청을 기존 스토어에 반영합니다.
///
/// `id`, `created`, `author`, `slug`는 유지하고, `photo`는 새 사진이 있을 때만 바꿉니다.
pub(crate) fn apply_update(existing: Store, request: StoreRequest, photo: Option<String>) -> Store {
    Store {
        name: request.name,
        description: request.description,
        tags: clean_tags(request.tags),
        location: request.location.and_then(|location| location.into_location()),
        photo: photo.or(existing.photo),
        ..existing
    }
}

fn author_required() -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(
        "author",
        ValidationError::new("required").with_message("작성자를 입력해주세요".into()),
    );
    AppError::from(errors)
}

/// 슬러그를 정하고 저장합니다. 유니크 인덱스와 충돌하면 번호를 올려 다시 시도합니다.
///
/// `store.id`가 있으면 교체이며, 충돌 집합에서 자기 자신을 제외합니다.
pub(crate) async fn assign_unique_slug<S: SlugStore + ?Sized>(
    repo: &S,
    mut store: Store,
    base: &str,
    previous_slug: Option<&str>,
) -> AppResult<Option<Store>> {
    for attempt in 0..MAX_SLUG_ATTEMPTS {
        let colliding = repo.count_collisions(base, store.id).await?;
        store.slug = numbered_slug(base, colliding, attempt);

        match repo.save(store.clone(), previous_slug).await {
            Err(AppError::ConflictError(_)) => {
                warn!("슬러그 충돌, 재시도 {}/{}: {}", attempt + 1, MAX_SLUG_ATTEMPTS, store.slug);
            }
            other => return other,
        }
    }

    Err(AppError::ConflictError(format!(
        "'{}' 슬러그를 할당하지 못했습니다. 잠시 후 다시 시도해주세요",
        base
    )))
}

/// 스토어 비즈니스 로직 서비스
///
/// ```rust,ignore
/// let service = StoreService::instance();
///
/// let created = service.create_store(request).await?;       // slug: "cafe"
/// let again = service.create_store(same_name).await?;       // slug: "cafe-2"
/// let detail = service.find_by_slug("cafe", true).await?;   // Option<StoreResponse>
/// ```
#[service(name = "store")]
pub struct StoreService {
    store_repo: Arc<StoreRepository>,
    review_repo: Arc<ReviewRepository>,
    upload_service: Arc<UploadService>,
}

impl StoreService {
    /// 새 스토어 생성
    ///
    /// # 에러
    ///
    /// * `FieldValidation` - 필드 검증 실패, `author` 누락
    /// * `UnsupportedMedia` - 사진이 이미지가 아님
    /// * `ConflictError` - 슬러그 재시도 횟수 초과
    pub async fn create_store(&self, mut request: StoreRequest) -> AppResult<StoreResponse> {
        request.validate()?;
        let author = request.author_id().ok_or_else(author_required)?;
        let base = slug_base(&request.name)?;

        let photo = self.upload_service.process(request.photo.take()).await?;
        let uploaded = photo.clone();

        let StoreRequest { name, description, tags, location, .. } = request;
        let store = Store::new(
            name,
            description,
            clean_tags(tags),
            location.and_then(|location| location.into_location()),
            photo,
            author,
        );

        let saved = assign_unique_slug(self.store_repo.as_ref(), store, &base, None).await;
        let created = self.discard_unsaved_photo(uploaded.as_deref(), saved).await?
            .ok_or_else(|| AppError::InternalError("생성된 스토어를 확인할 수 없습니다".to_string()))?;

        Ok(StoreResponse::from(created))
    }

    /// 기존 스토어 수정
    ///
    /// * `Ok(None)` - 해당 ID의 스토어가 없음
    pub async fn update_store(&self, id: &str, mut request: StoreRequest) -> AppResult<Option<StoreResponse>> {
        request.force_point_location();
        request.validate()?;

        let Some(existing) = self.store_repo.find_by_id(id).await? else {
            return Ok(None);
        };

        let base = if slug_needs_recompute(&existing.name, &request.name) {
            Some(slug_base(&request.name)?)
        } else {
            None
        };

        let photo = self.upload_service.process(request.photo.take()).await?;
        let uploaded = photo.clone();
        let previous_slug = existing.slug.clone();
        let store = apply_update(existing, request, photo);

        let saved = match base {
            Some(base) => {
                assign_unique_slug(self.store_repo.as_ref(), store, &base, Some(&previous_slug)).await
            }
            None => self.store_repo.replace(store, None).await,
        };
        let updated = self.discard_unsaved_photo(uploaded.as_deref(), saved).await?;

        Ok(updated.map(StoreResponse::from))
    }

    /// 저장되지 않은 스토어의 새 사진 파일을 지웁니다.
    async fn discard_unsaved_photo(
        &self,
        photo: Option<&str>,
        saved: AppResult<Option<Store>>,
    ) -> AppResult<Option<Store>> {
        if let (Some(filename), false) = (photo, matches!(saved, Ok(Some(_)))) {
            self.upload_service.discard(filename).await;
        }
        saved
    }

    /// 슬러그로 조회. `include_reviews`이면 리뷰를 최신순으로 붙입니다.
    pub async fn find_by_slug(&self, slug: &str, include_reviews: bool) -> AppResult<Option<StoreResponse>> {
        match self.store_repo.find_by_slug(slug).await? {
            Some(store) => self.with_reviews(store, include_reviews).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn find_by_id(&self, id: &str, include_reviews: bool) -> AppResult<Option<StoreResponse>> {
        match self.store_repo.find_by_id(id).await? {
            Some(store) => self.with_reviews(store, include_reviews).await.map(Some),
            None => Ok(None),
        }
    }

    async fn with_reviews(&self, store: Store, include_reviews: bool) -> AppResult<StoreResponse> {
        let reviews = match (include_reviews, store.id.as_ref()) {
            (true, Some(id)) => Some(self.review_repo.find_by_store(id).await?),
            _ => None,
        };
        Ok(StoreResponse::with_reviews(store, reviews))
    }

    /// 최신순 목록 페이지 (1부터 시작)
    pub async fn list_stores(&self, page: u64) -> AppResult<StorePageResponse> {
        let page = page.max(1);
        let per_page = StoreQueryConfig::stores_per_page();
        let skip = (page - 1).saturating_mul(per_page);

        let (stores, count) = self.store_repo.find_page(skip, per_page as i64).await?;
        Ok(StorePageResponse::new(stores, page, per_page, count))
    }

    /// 근처 스토어, 가까운 순
    pub async fn find_nearby(&self, query: NearQuery) -> AppResult<Vec<StoreResponse>> {
        query.validate()?;

        let max_distance = query
            .max_distance
            .unwrap_or_else(StoreQueryConfig::nearby_max_distance_meters);

        let stores = self.store_repo
            .find_nearby(query.lng, query.lat, max_distance, StoreQueryConfig::nearby_limit())
            .await?;

        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }

    /// 이름/설명 텍스트 검색. 빈 검색어는 빈 결과입니다.
    pub async fn search(&self, query: &str) -> AppResult<Vec<StoreResponse>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let stores = self.store_repo
            .text_search(query, StoreQueryConfig::search_limit())
            .await?;

        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }

    /// 태그 페이지: 전체 태그 집계와 선택된 태그(없으면 태그가 있는 모든 스토어)의 스토어 목록
    pub async fn tag_page(&self, tag: Option<String>) -> AppResult<TagPageResponse> {
        let (tags, stores) = try_join(
            self.store_repo.tags_list(),
            self.store_repo.find_by_tag(tag.as_deref()),
        )
        .await?;

        Ok(TagPageResponse {
            tag,
            tags: tags.into_iter().map(TagCountResponse::from).collect(),
            stores: stores.into_iter().map(StoreResponse::from).collect(),
        })
    }

    /// 리뷰 2개 이상인 스토어 중 평균 평점 상위
    pub async fn top_stores(&self) -> AppResult<Vec<StoreResponse>> {
        let stores = self.store_repo.top_stores(TOP_STORES_LIMIT).await?;
        info!("평점 상위 스토어 {}개 조회", stores.len());
        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }
}
