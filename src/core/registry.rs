//! # 싱글톤 레지스트리
//!
//! `singleton_macro`의 `#[repository]` 매크로와 서비스의 `inventory::submit!`이 만드는 등록 정보를
//! `inventory`로 수집하고, 타입별 인스턴스를 한 번만 만들어 공유합니다.
//!
//! ```text
//! main.rs ──set()──▶ Database, RedisClient
//!                         │
//!                         ▼
//!          ServiceLocator::get::<UserRepository>()
//!                         │
//!                         ▼
//!        RepositoryRegistration("user_repository").constructor()
//! ```
//!
//! 인스턴스 생성은 락 밖에서 수행합니다. 생성자가 다시 `get()`을 호출해
//! 자신의 의존성을 해결하기 때문입니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    /// 인덱스 생성 등 초기화 작업을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();
    log::debug!("Service 캐시 구성 완료: {}개", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 캐시
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (normalize_registration_name(registration.name), registration))
        .collect();
    log::debug!("Repository 캐시 구성 완료: {}개", cache.len());
    cache
});

/// `user_service`, `user_repository` 형태의 등록 이름을 `user`로 정규화합니다.
fn normalize_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `auth::repositories::UserRepository` → `UserRepository`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 등록된 생성자를 찾을 수 있는 타입 범주
enum Category {
    Repository(String),
    Service(String),
}

fn categorize(short_name: &str) -> Option<Category> {
    if let Some(entity) = short_name.strip_suffix("Repository") {
        return Some(Category::Repository(entity.to_lowercase()));
    }
    short_name
        .strip_suffix("Service")
        .map(|entity| Category::Service(entity.to_lowercase()))
}

/// 싱글톤 의존성 주입 컨테이너
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
        let instances = self.instances.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 캐시에 없으면 타입 이름(`XxxRepository` / `XxxService`)으로 등록 정보를 찾아
    /// 생성한 뒤 캐시에 저장합니다.
    ///
    /// # Panics
    ///
    /// 순환 참조, 미등록 타입, 타입 불일치는 애플리케이션 구성 오류이므로
    /// 시작 단계에서 즉시 실패하도록 패닉합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = LOCATOR.cached::<T>() {
            return instance;
        }

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let created = Self::construct::<T>(short_type_name(type_name));

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&type_id);

        let instance = match created {
            Some(instance) => instance,
            None => panic!(
                "Service not found: {}. Register it with #[repository], inventory::submit! or ServiceLocator::set()",
                type_name
            ),
        };

        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // 다른 스레드가 먼저 등록했다면 그 인스턴스를 사용합니다.
        let entry = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);
        entry.clone().downcast::<T>().unwrap_or(instance)
    }

    fn construct<T: 'static + Send + Sync>(short_name: &str) -> Option<Arc<T>> {
        let boxed = match categorize(short_name)? {
            Category::Repository(entity) => (REPOSITORY_NAME_CACHE.get(&entity)?.constructor)(),
            Category::Service(entity) => (SERVICE_NAME_CACHE.get(&entity)?.constructor)(),
        };

        // 생성자는 `Arc<T>` 또는 `Arc<dyn Any>`를 박싱해서 돌려줍니다.
        let boxed = match boxed.downcast::<Arc<T>>() {
            Ok(instance) => return Some(*instance),
            Err(other) => other,
        };

        match boxed.downcast::<Arc<dyn Any + Send + Sync>>() {
            Ok(erased) => match (*erased).downcast::<T>() {
                Ok(instance) => Some(instance),
                Err(_) => panic!("Type mismatch for registered component: {}", short_name),
            },
            Err(_) => panic!("Type mismatch for registered component: {}", short_name),
        }
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// 매크로로 관리되지 않는 인프라 컴포넌트(Database, RedisClient)에 사용합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = short_type_name(std::any::type_name::<T>());
        log::info!("📦 Registering: {}", clean_name);

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저, 서비스를 나중에 생성합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 서비스 레지스트리 초기화 시작");

        let repositories: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        for registration in &repositories {
            let _instance = (registration.constructor)();
            log::debug!("  ✓ repository {}", registration.name);
        }

        let services: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        for registration in &services {
            let _instance = (registration.constructor)();
            log::debug!("  ✓ service {}", registration.name);
        }

        log::info!(
            "✅ 레지스트리 초기화 완료: repository {}개, service {}개",
            repositories.len(),
            services.len()
        );
        Ok(())
    }
}

/// 전역 서비스 로케이터 인스턴스
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
