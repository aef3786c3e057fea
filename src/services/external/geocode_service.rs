//! # Geocoding 서비스
//!
//! 자유 형식 주소를 좌표와 도시/주로 변환합니다.
//!
//! 도시와 주는 주소 구성요소의 `types`로 찾습니다.
//!
//! | 필드 | 구성요소 타입 (우선순위 순) |
//! |------|-----------------------------|
//! | city | `locality` → `postal_town` → `sublocality` |
//! | state | `administrative_area_level_1` |
//!
//! 두 값 모두 `short_name`을 사용합니다.
//!
//! [`Geocoder::resolve`]는 실패 사유를 담은 [`GeocodeFailure`]를 돌려주고,
//! [`Geocoder::resolve_or_sentinel`]은 실패 시 사유를 로그로 남긴 뒤
//! 센티널 좌표 (0, 0)을 돌려줍니다.

use std::sync::Arc;
use async_trait::async_trait;
use once_cell::sync::OnceCell;

use crate::config::GeocodeConfig;
use crate::domain::models::geo::{
    AddressComponent, GeocodeApiResponse, GeocodeFailure, ResolvedAddress,
};
use crate::services::external::http_client;

const CITY_COMPONENT_TYPES: [&str; 3] = ["locality", "postal_town", "sublocality"];
const STATE_COMPONENT_TYPE: &str = "administrative_area_level_1";

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, GeocodeFailure>;

    async fn resolve_or_sentinel(&self, address: &str) -> ResolvedAddress {
        match self.resolve(address).await {
            Ok(resolved) => resolved,
            Err(failure) => {
                log::warn!("주소 변환 실패 ({}): {}", address, failure);
                ResolvedAddress::sentinel(address)
            }
        }
    }
}

pub struct GeocodeService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

static GEOCODE_SERVICE_INSTANCE: OnceCell<Arc<GeocodeService>> = OnceCell::new();

impl GeocodeService {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self { client, api_url, api_key }
    }

    pub fn instance() -> Arc<Self> {
        GEOCODE_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    http_client(),
                    GeocodeConfig::api_url(),
                    GeocodeConfig::api_key(),
                ))
            })
            .clone()
    }

    /// API 응답에서 첫 번째 결과를 꺼내 변환 결과를 만듭니다.
    pub fn parse_response(response: GeocodeApiResponse) -> Result<ResolvedAddress, GeocodeFailure> {
        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeFailure::NoResults),
            other => {
                let status = match &response.error_message {
                    Some(message) => format!("{} ({})", other, message),
                    None => other.to_string(),
                };
                return Err(GeocodeFailure::ApiStatus(status));
            }
        }

        let first = response.results.into_iter().next().ok_or(GeocodeFailure::NoResults)?;

        let location = first
            .geometry
            .map(|geometry| geometry.location)
            .ok_or(GeocodeFailure::MissingField("geometry.location"))?;

        let full_address = first
            .formatted_address
            .filter(|address| !address.trim().is_empty())
            .ok_or(GeocodeFailure::MissingField("formatted_address"))?;

        let city = CITY_COMPONENT_TYPES
            .iter()
            .find_map(|component_type| short_name_of(&first.address_components, component_type))
            .ok_or(GeocodeFailure::MissingField("locality"))?;

        let state = short_name_of(&first.address_components, STATE_COMPONENT_TYPE)
            .ok_or(GeocodeFailure::MissingField(STATE_COMPONENT_TYPE))?;

        Ok(ResolvedAddress {
            full_address,
            latitude: location.lat,
            longitude: location.lng,
            city,
            state,
        })
    }
}

fn short_name_of(components: &[AddressComponent], component_type: &str) -> Option<String> {
    components
        .iter()
        .find(|component| component.has_type(component_type))
        .map(|component| component.short_name.clone())
}

#[async_trait]
impl Geocoder for GeocodeService {
    async fn resolve(&self, address: &str) -> Result<ResolvedAddress, GeocodeFailure> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeFailure::EmptyAddress);
        }
        if self.api_key.is_empty() {
            return Err(GeocodeFailure::NotConfigured);
        }

        let response = self.client
            .get(&self.api_url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodeFailure::Timeout
                } else {
                    GeocodeFailure::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeFailure::HttpStatus(status.as_u16()));
        }

        let body = response
            .json::<GeocodeApiResponse>()
            .await
            .map_err(|e| GeocodeFailure::Malformed(e.to_string()))?;

        let resolved = Self::parse_response(body)?;
        log::debug!("주소 변환 완료: {} → {}, {}", address, resolved.city, resolved.state);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<ResolvedAddress, GeocodeFailure> {
        let response: GeocodeApiResponse = serde_json::from_str(json).unwrap();
        GeocodeService::parse_response(response)
    }

    const AUSTIN: &str = r#"{
        "status": "OK",
        "results": [{
            "formatted_address": "1100 Congress Ave, Austin, TX 78701, USA",
            "geometry": {"location": {"lat": 30.2747, "lng": -97.7404}},
            "address_components": [
                {"long_name": "1100", "short_name": "1100", "types": ["street_number"]},
                {"long_name": "Congress Avenue", "short_name": "Congress Ave", "types": ["route"]},
                {"long_name": "Downtown", "short_name": "Downtown", "types": ["neighborhood", "political"]},
                {"long_name": "Austin", "short_name": "Austin", "types": ["locality", "political"]},
                {"long_name": "Travis County", "short_name": "Travis County", "types": ["administrative_area_level_2", "political"]},
                {"long_name": "Texas", "short_name": "TX", "types": ["administrative_area_level_1", "political"]},
                {"long_name": "United States", "short_name": "US", "types": ["country", "political"]},
                {"long_name": "78701", "short_name": "78701", "types": ["postal_code"]}
            ]
        }]
    }"#;

    #[test]
    fn test_parse_uses_component_types() {
        let resolved = parse(AUSTIN).unwrap();
        assert_eq!(resolved.city, "Austin");
        assert_eq!(resolved.state, "TX");
        assert_eq!(resolved.latitude, 30.2747);
        assert!(!resolved.is_sentinel());
    }

    #[test]
    fn test_parse_falls_back_to_postal_town() {
        let json = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "10 Downing St, London SW1A 2AA, UK",
                "geometry": {"location": {"lat": 51.5034, "lng": -0.1276}},
                "address_components": [
                    {"long_name": "London", "short_name": "London", "types": ["postal_town"]},
                    {"long_name": "England", "short_name": "England", "types": ["administrative_area_level_1", "political"]}
                ]
            }]
        }"#;

        let resolved = parse(json).unwrap();
        assert_eq!(resolved.city, "London");
        assert_eq!(resolved.state, "England");
    }

    #[test]
    fn test_parse_failures_are_typed() {
        assert_eq!(
            parse(r#"{"status": "ZERO_RESULTS", "results": []}"#),
            Err(GeocodeFailure::NoResults)
        );

        match parse(r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#) {
            Err(GeocodeFailure::ApiStatus(status)) => assert!(status.contains("REQUEST_DENIED")),
            other => panic!("Expected ApiStatus, got {:?}", other),
        }

        let no_state = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "Somewhere",
                "geometry": {"location": {"lat": 1.0, "lng": 2.0}},
                "address_components": [{"long_name": "Town", "short_name": "Town", "types": ["locality"]}]
            }]
        }"#;
        assert_eq!(
            parse(no_state),
            Err(GeocodeFailure::MissingField("administrative_area_level_1"))
        );
    }

    #[actix_web::test]
    async fn test_empty_address_resolves_to_sentinel() {
        let service = GeocodeService::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/geocode".to_string(),
            "key".to_string(),
        );

        assert_eq!(service.resolve("   ").await, Err(GeocodeFailure::EmptyAddress));

        let resolved = service.resolve_or_sentinel("").await;
        assert!(resolved.is_sentinel());
        assert_eq!(resolved.city, "city");
        assert_eq!(resolved.state, "state");
    }

    #[actix_web::test]
    async fn test_missing_api_key_resolves_to_sentinel() {
        let service = GeocodeService::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/geocode".to_string(),
            String::new(),
        );

        let resolved = service.resolve_or_sentinel("1100 Congress Ave").await;
        assert!(resolved.is_sentinel());
        assert_eq!(resolved.full_address, "1100 Congress Ave");
    }
}
