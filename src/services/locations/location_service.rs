//! # 위치 서비스
//!
//! 주소를 Geocoding으로 변환해 위치를 저장하고, 세션의 현재 위치로 지정합니다.
//! 변환에 실패한 주소(센티널 좌표)는 저장하지 않고 `InvalidAddress`로 거부합니다.

use std::any::Any;
use std::sync::Arc;
use once_cell::sync::OnceCell;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Location, LocationUpdate};
use crate::domain::models::auth::RequestContext;
use crate::domain::models::geo::ResolvedAddress;
use crate::repositories::{LocationStore, Stores};
use crate::services::auth::SessionService;
use crate::services::external::{GeocodeService, Geocoder};
use crate::utils::string_utils::parse_object_id;

pub struct LocationService {
    locations: Arc<dyn LocationStore>,
    geocoder: Arc<dyn Geocoder>,
    sessions: Arc<SessionService>,
}

static LOCATION_SERVICE_INSTANCE: OnceCell<Arc<LocationService>> = OnceCell::new();

impl LocationService {
    pub fn new(stores: &Stores, geocoder: Arc<dyn Geocoder>, sessions: Arc<SessionService>) -> Self {
        Self {
            locations: stores.locations.clone(),
            geocoder,
            sessions,
        }
    }

    pub fn instance() -> Arc<Self> {
        LOCATION_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    &Stores::registered(),
                    GeocodeService::instance(),
                    SessionService::instance(),
                ))
            })
            .clone()
    }

    async fn geocode(&self, address: &str) -> AppResult<ResolvedAddress> {
        let resolved = self.geocoder.resolve_or_sentinel(address).await;
        if resolved.is_sentinel() {
            return Err(AppError::InvalidAddress(
                "Location could not be found. Please enter a full address".to_string(),
            ));
        }
        Ok(resolved)
    }

    /// 새 위치를 저장하고 현재 위치로 지정합니다.
    pub async fn add_location(&self, context: &RequestContext, name: Option<String>, address: &str) -> AppResult<Location> {
        let user = context.require_user()?;
        let resolved = self.geocode(address).await?;
        // 바인딩할 세션이 없으면 위치를 저장하지 않습니다.
        self.sessions.ensure_active(context).await?;

        let location = self
            .locations
            .create(Location::new(user.id, name, resolved))
            .await?;
        self.sessions.bind_location(context, &location).await?;

        log::info!("📍 위치 추가: {} → {}, {}", user.username, location.city, location.state);
        Ok(location)
    }

    pub fn current_location(&self, context: &RequestContext) -> AppResult<Option<Location>> {
        context.require_user()?;
        Ok(context.location.clone())
    }

    /// 현재 위치의 주소를 다시 변환해 덮어씁니다.
    pub async fn update_current_location(
        &self,
        context: &RequestContext,
        name: Option<String>,
        address: &str,
    ) -> AppResult<Location> {
        context.require_user()?;
        let current = context.require_location()?;
        let resolved = self.geocode(address).await?;

        self.locations
            .update(&current.id, &LocationUpdate { name, resolved })
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))
    }

    /// 사용자의 위치 목록 (최신순)
    pub async fn list_locations(&self, context: &RequestContext) -> AppResult<Vec<Location>> {
        let user = context.require_user()?;
        self.locations.find_by_user(&user.id).await
    }

    /// 저장된 위치 중 하나를 현재 위치로 지정합니다.
    pub async fn select_location(&self, context: &RequestContext, location_id: &str) -> AppResult<Location> {
        let user = context.require_user()?;
        let id = parse_object_id(location_id, "Location")?;

        let location = self
            .locations
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location not found".to_string()))?;

        if !location.is_owned_by(&user.id) {
            return Err(AppError::Forbidden("You can only select your own locations".to_string()));
        }

        self.sessions.bind_location(context, &location).await?;
        Ok(location)
    }
}

fn construct_location_service() -> Box<dyn Any + Send + Sync> {
    Box::new(LocationService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "location_service",
        constructor: construct_location_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::repositories::memory::InMemoryStore;
    use crate::services::fixtures::{seed_location, seed_user, tokens, StaticGeocoder};

    const HOME: &str = "1100 Congress Ave, Austin, TX";
    const OFFICE: &str = "1600 Broadway, Denver, CO";

    struct Harness {
        memory: Arc<InMemoryStore>,
        sessions: Arc<SessionService>,
        locations: LocationService,
    }

    impl Harness {
        fn new() -> Self {
            let memory = InMemoryStore::new();
            let stores = memory.stores();
            let sessions = Arc::new(SessionService::new(&stores, tokens(), 3600));
            let geocoder = StaticGeocoder::default()
                .with(HOME, "Austin", "TX")
                .with(OFFICE, "Denver", "CO")
                .shared();
            let locations = LocationService::new(&stores, geocoder, sessions.clone());
            Self { memory, sessions, locations }
        }

        async fn login(&self, user: &User) -> (String, RequestContext) {
            let issued = self.sessions.login(user).await.unwrap();
            let context = self.sessions.resolve(Some(&issued.token)).await.unwrap();
            (issued.token, context)
        }
    }

    #[actix_web::test]
    async fn test_add_location_binds_current_location() {
        let harness = Harness::new();
        let alice = seed_user(&harness.memory.stores(), "alice").await;
        let (token, context) = harness.login(&alice).await;

        let added = harness
            .locations
            .add_location(&context, Some("Home".to_string()), HOME)
            .await
            .unwrap();
        assert_eq!(added.city, "Austin");
        assert_eq!(added.name.as_deref(), Some("Home"));

        let next_request = harness.sessions.resolve(Some(&token)).await.unwrap();
        assert_eq!(next_request.location.unwrap().id, added.id);
    }

    #[actix_web::test]
    async fn test_unresolvable_address_is_never_persisted() {
        let harness = Harness::new();
        let alice = seed_user(&harness.memory.stores(), "alice").await;
        let (_, context) = harness.login(&alice).await;

        for address in ["", "somewhere nobody knows"] {
            let result = harness.locations.add_location(&context, None, address).await;
            assert!(matches!(result, Err(AppError::InvalidAddress(_))));
        }

        assert!(harness.locations.list_locations(&context).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_expired_session_does_not_persist_location() {
        let harness = Harness::new();
        let alice = seed_user(&harness.memory.stores(), "alice").await;
        let (_, context) = harness.login(&alice).await;
        let session_id = context.session_id.clone().unwrap();
        harness.sessions.logout(&session_id).await.unwrap();

        let result = harness.locations.add_location(&context, None, HOME).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));

        let persisted = harness.memory.stores().locations.find_by_user(&alice.id).await.unwrap();
        assert!(persisted.is_empty());
    }

    #[actix_web::test]
    async fn test_anonymous_cannot_add_location() {
        let harness = Harness::new();
        let result = harness
            .locations
            .add_location(&RequestContext::anonymous(), None, HOME)
            .await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn test_update_current_location_requires_one() {
        let harness = Harness::new();
        let alice = seed_user(&harness.memory.stores(), "alice").await;
        let (token, context) = harness.login(&alice).await;

        let result = harness.locations.update_current_location(&context, None, OFFICE).await;
        assert!(matches!(result, Err(AppError::InvalidOperation(_))));

        harness.locations.add_location(&context, None, HOME).await.unwrap();
        let context = harness.sessions.resolve(Some(&token)).await.unwrap();

        let moved = harness
            .locations
            .update_current_location(&context, None, OFFICE)
            .await
            .unwrap();
        assert_eq!(moved.city, "Denver");
        assert_eq!(moved.state, "CO");
    }

    #[actix_web::test]
    async fn test_select_location_checks_ownership() {
        let harness = Harness::new();
        let stores = harness.memory.stores();
        let alice = seed_user(&stores, "alice").await;
        let bob = seed_user(&stores, "bob").await;
        let alices = seed_location(&stores, &alice, "Austin", "TX").await;
        let bobs = seed_location(&stores, &bob, "Denver", "CO").await;
        let (token, context) = harness.login(&alice).await;

        let forbidden = harness.locations.select_location(&context, &bobs.id.to_hex()).await;
        assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

        let missing = harness.locations.select_location(&context, "missing").await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        harness
            .locations
            .select_location(&context, &alices.id.to_hex())
            .await
            .unwrap();
        let context = harness.sessions.resolve(Some(&token)).await.unwrap();
        assert_eq!(
            harness.locations.current_location(&context).unwrap().map(|l| l.id),
            Some(alices.id)
        );
    }
}
