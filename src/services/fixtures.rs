//! 서비스 테스트용 픽스처

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;

use crate::domain::entities::{Location, NewUserProfile, User};
use crate::domain::models::geo::{GeocodeFailure, ResolvedAddress};
use crate::repositories::Stores;
use crate::services::auth::TokenService;
use crate::services::external::Geocoder;

pub fn tokens() -> TokenService {
    TokenService::new("test-secret".to_string(), 1)
}

pub fn profile(username: &str) -> NewUserProfile {
    NewUserProfile {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        image_url: None,
        bio: None,
    }
}

/// 비밀번호 해싱 없이 사용자를 바로 저장합니다.
pub async fn seed_user(stores: &Stores, username: &str) -> User {
    stores
        .users
        .create(User::new(profile(username), "not-a-real-hash".to_string()))
        .await
        .unwrap()
}

pub fn resolved(address: &str, city: &str, state: &str) -> ResolvedAddress {
    ResolvedAddress {
        full_address: address.to_string(),
        latitude: 30.2672,
        longitude: -97.7431,
        city: city.to_string(),
        state: state.to_string(),
    }
}

pub async fn seed_location(stores: &Stores, owner: &User, city: &str, state: &str) -> Location {
    let address = format!("1 Main St, {}, {}", city, state);
    stores
        .locations
        .create(Location::new(owner.id, None, resolved(&address, city, state)))
        .await
        .unwrap()
}

/// 등록된 주소만 변환하고 나머지는 `NoResults`로 실패하는 Geocoder
#[derive(Default)]
pub struct StaticGeocoder {
    known: HashMap<String, ResolvedAddress>,
}

impl StaticGeocoder {
    pub fn with(mut self, address: &str, city: &str, state: &str) -> Self {
        self.known
            .insert(address.to_string(), resolved(address, city, state));
        self
    }

    pub fn shared(self) -> Arc<dyn Geocoder> {
        Arc::new(self)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, GeocodeFailure> {
        if address.trim().is_empty() {
            return Err(GeocodeFailure::EmptyAddress);
        }
        self.known
            .get(address)
            .cloned()
            .ok_or(GeocodeFailure::NoResults)
    }
}
