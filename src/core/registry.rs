//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! `singleton_macro`의 `#[service]`, `#[repository]` 매크로가 생성하는 코드는
//! 이 모듈의 타입들을 `crate::core::registry` 경로로 참조합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository(name = "reborn")] → RepositoryRegistration { name: "reborn_repository" }
//!    ├─ #[service(name = "reborn")]    → ServiceRegistration { name: "reborn_service" }
//!    └─ inventory::collect!            → 전역 레지스트리
//!
//! 2. 런타임 초기화
//!    └─ ServiceLocator::set(Arc<Database>)  인프라 컴포넌트 직접 등록
//!
//! 3. 의존성 주입
//!    ├─ RebornService::instance() → new()
//!    ├─ reborn_repo: Arc<RebornRepository> → ServiceLocator::get::<RebornRepository>()
//!    └─ sqlite: Arc<Database>              → ServiceLocator::get::<Database>()
//! ```
//!
//! 타입 이름에서 `Repository`/`Service` 접미사를 떼고 소문자로 바꾼 값이
//! 등록 이름의 접두사와 일치해야 합니다 (`RebornRepository` ↔ `reborn_repository`).

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// 비즈니스 로직 컴포넌트 (`#[service]` 매크로가 구현)
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 컴포넌트 (`#[repository]` 매크로가 구현)
///
/// `collection_name`은 이 프로젝트에서 리포지토리가 담당하는 테이블 이름입니다.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (strip_component_suffix(registration.name), registration))
        .collect();

    log::debug!("Service 레지스트리 캐시 초기화: {}개", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let cache: HashMap<_, _> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (strip_component_suffix(registration.name), registration))
        .collect();

    log::debug!("Repository 레지스트리 캐시 초기화: {}개", cache.len());
    cache
});

/// `reborn_repository` → `reborn`, `token_service` → `token`
fn strip_component_suffix(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `reborn_backend::services::reborns::RebornService` → `RebornService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 컴포넌트 종류 판별 결과
enum ComponentKind {
    Repository(String),
    Service(String),
}

impl ComponentKind {
    fn of(short_name: &str) -> Option<Self> {
        if let Some(entity) = short_name.strip_suffix("Repository") {
            Some(ComponentKind::Repository(entity.to_lowercase()))
        } else if let Some(entity) = short_name.strip_suffix("Service") {
            Some(ComponentKind::Service(entity.to_lowercase()))
        } else {
            None
        }
    }
}

/// 전역 싱글톤 컨테이너
///
/// 의존성 해결에 실패하면 패닉합니다. 모든 컴포넌트는 서버 시작 시
/// [`ServiceLocator::initialize_all`]에서 생성되므로 설정 오류는 기동 단계에서 드러납니다.
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances
            .get(&type_id)
            .cloned()
            .and_then(|instance| instance.downcast::<T>().ok())
    }

    /// 타입에 해당하는 싱글톤 인스턴스를 반환합니다.
    ///
    /// 직접 등록된 인스턴스가 있으면 그것을, 없으면 레지스트리의 생성자를 호출합니다.
    /// 생성자는 매크로가 만든 `instance()`를 호출하므로 `OnceCell`이 실제 싱글톤을 보장하고,
    /// 이 컨테이너는 그 결과를 `TypeId` 기준으로 캐시합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        // 생성자가 다른 컴포넌트를 재귀적으로 요청하므로 락을 잡지 않은 상태로 호출해야 합니다.
        let boxed = match ComponentKind::of(short_type_name(type_name)) {
            Some(ComponentKind::Repository(entity)) => REPOSITORY_NAME_CACHE
                .get(&entity)
                .map(|registration| (registration.constructor)()),
            Some(ComponentKind::Service(entity)) => SERVICE_NAME_CACHE
                .get(&entity)
                .map(|registration| (registration.constructor)()),
            None => None,
        };

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&type_id);

        let instance = match boxed.map(|b| b.downcast::<Arc<T>>()) {
            Some(Ok(arc_instance)) => *arc_instance,
            Some(Err(_)) => panic!("Type mismatch in ServiceLocator for {}", type_name),
            None => panic!(
                "Service not found: {}. Register it with #[service]/#[repository] or ServiceLocator::set()",
                type_name
            ),
        };

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);

        instance
    }

    /// 인프라 컴포넌트(데이터베이스 등)를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        log::info!("📦 Registering: {}", short_type_name(std::any::type_name::<T>()));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만들어 서비스 생성 시 주입할 인스턴스가 준비되도록 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        log::info!("🔄 서비스 레지스트리 초기화 시작");

        let repo_count = inventory::iter::<RepositoryRegistration>()
            .map(|registration| {
                let _instance = (registration.constructor)();
                log::info!("  ✓ repository: {}", registration.name);
            })
            .count();

        let service_count = inventory::iter::<ServiceRegistration>()
            .map(|registration| {
                let _instance = (registration.constructor)();
                log::info!("  ✓ service: {}", registration.name);
            })
            .count();

        log::info!(
            "✅ 레지스트리 초기화 완료: repository {}개, service {}개",
            repo_count,
            service_count
        );

        Ok(())
    }
}
