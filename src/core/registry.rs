//! # Service Registry
//!
//! `#[service]` / `#[repository]` 매크로로 선언된 싱글톤 컴포넌트를 보관하는
//! 의존성 주입 컨테이너입니다.
//!
//! ## 동작 순서
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository] → RepositoryRegistration 제출 (inventory)
//!    └─ #[service]    → ServiceRegistration 제출 (inventory)
//!
//! 2. main() 시작
//!    ├─ ServiceLocator::set(Arc<Database>)
//!    ├─ ServiceLocator::set(Arc<RedisClient>)
//!    └─ ServiceLocator::initialize_all()  // 리포지토리 → 서비스 순서
//!
//! 3. 요청 처리
//!    └─ StoreService::instance() → ServiceLocator::get::<StoreService>()
//! ```
//!
//! 스토어 서비스 구성 예시:
//!
//! ```rust,ignore
//! #[repository(name = "store", collection = "stores")]
//! pub struct StoreRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "store")]
//! pub struct StoreService {
//!     store_repo: Arc<StoreRepository>,   // 자동 주입
//!     review_repo: Arc<ReviewRepository>, // 자동 주입
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use log::{debug, error, info};
use once_cell::sync::Lazy;

/// 비즈니스 로직 서비스 공통 인터페이스 (`#[service]`가 자동 구현)
#[async_trait]
pub trait Service: Send + Sync {
    /// 레지스트리에서 사용하는 서비스 이름
    fn name(&self) -> &str;

    /// 최초 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리 공통 인터페이스 (`#[repository]`가 자동 구현)
#[async_trait]
pub trait Repository: Send + Sync {
    /// 레지스트리에서 사용하는 리포지토리 이름
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 최초 생성 직후 호출되는 초기화 훅
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보 (`inventory`로 수집)
pub struct ServiceRegistration {
    /// 등록 이름 (예: `store_service`)
    pub name: &'static str,
    /// 싱글톤 인스턴스를 만들어 `Box<Arc<T>>`로 돌려주는 생성자
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보 (`inventory`로 수집)
pub struct RepositoryRegistration {
    /// 등록 이름 (예: `store_repository`)
    pub name: &'static str,
    /// 싱글톤 인스턴스를 만들어 `Box<Arc<T>>`로 돌려주는 생성자
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 정규화된 이름(`store`) → 서비스 등록 정보
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (strip_registration_suffix(registration.name), registration))
        .collect();

    debug!("🗂️ Service 이름 캐시 구성 완료: {}개", cache.len());
    cache
});

/// 정규화된 이름(`store`) → 리포지토리 등록 정보
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (strip_registration_suffix(registration.name), registration))
        .collect();

    debug!("🗂️ Repository 이름 캐시 구성 완료: {}개", cache.len());
    cache
});

/// `store_service` / `store_repository` → `store`
fn strip_registration_suffix(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// 컴포넌트 종류 (타입 이름 접미사로 판별)
#[derive(Debug, Clone, Copy, PartialEq)]
enum ComponentKind {
    Repository,
    Service,
}

/// `delicious_backend::services::stores::StoreService` → (`Service`, `store`)
fn classify_type_name(type_name: &str) -> Option<(ComponentKind, String)> {
    let short = type_name.rsplit("::").next().unwrap_or(type_name);

    if let Some(entity) = short.strip_suffix("Repository") {
        return Some((ComponentKind::Repository, entity.to_lowercase()));
    }
    if let Some(entity) = short.strip_suffix("Service") {
        return Some((ComponentKind::Service, entity.to_lowercase()));
    }
    None
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - 타입당 하나의 인스턴스 (`TypeId` 키)
/// - 첫 요청 시 지연 생성, 이후 캐시 반환
/// - 생성 중인 타입을 추적하여 순환 의존성을 즉시 패닉으로 드러냄
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(&self) -> Option<Arc<T>> {
        let instances = self.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// # Panics
    ///
    /// 순환 의존성, 미등록 타입, 타입 불일치는 설정 오류이므로
    /// 서버가 요청을 받기 전에 패닉으로 드러나도록 합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = LOCATOR.cached::<T>() {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                error!("❌ 순환 의존성 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자 안에서 다른 컴포넌트를 get() 하므로 instances 락을 잡지 않은 채로 생성
        let created = Self::construct::<T>(type_name);

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&type_id);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let instance = instances
            .entry(type_id)
            .or_insert_with(|| created.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        instance
            .downcast::<T>()
            .unwrap_or_else(|_| panic!("Type mismatch in ServiceLocator for {}", type_name))
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let Some((kind, entity_name)) = classify_type_name(type_name) else {
            panic!(
                "Component not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                type_name
            );
        };

        let (registration_name, constructor) = match kind {
            ComponentKind::Repository => REPOSITORY_NAME_CACHE
                .get(&entity_name)
                .map(|r| (r.name, r.constructor)),
            ComponentKind::Service => SERVICE_NAME_CACHE
                .get(&entity_name)
                .map(|r| (r.name, r.constructor)),
        }
        .unwrap_or_else(|| panic!("No {:?} registered for entity: {}", kind, entity_name));

        match constructor().downcast::<Arc<T>>() {
            Ok(instance) => *instance,
            Err(_) => panic!("Type mismatch for {:?}: {}", kind, registration_name),
        }
    }

    /// 외부에서 만든 인프라 인스턴스(Database, RedisClient 등)를 등록합니다.
    ///
    /// `initialize_all()` 이전에 호출되어야 합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        info!("📦 Registering: {}", type_name.rsplit("::").next().unwrap_or(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만들고 서비스를 나중에 만듭니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        info!("🔄 서비스 레지스트리 초기화 시작");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        for registration in &repositories {
            let _ = (registration.constructor)();
            debug!("  ✓ {}", registration.name);
        }
        info!("→ Step 1: Repository {}개 생성 완료", repositories.len());

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        for registration in &services {
            let _ = (registration.constructor)();
            debug!("  ✓ {}", registration.name);
        }
        info!("→ Step 2: Service {}개 생성 완료", services.len());

        info!(
            "✅ 서비스 레지스트리 초기화 완료 (repository {}, service {})",
            repositories.len(),
            services.len()
        );
        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
