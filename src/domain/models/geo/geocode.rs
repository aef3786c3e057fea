//! Geocoding 모델
//!
//! 주소 → 좌표 변환 결과, 실패 사유, 그리고 Geocoding API 응답 계약입니다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 변환 실패 시 사용하는 센티널 값
pub const SENTINEL_CITY: &str = "city";
pub const SENTINEL_STATE: &str = "state";

/// 주소 변환 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub full_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
}

impl ResolvedAddress {
    /// 변환 실패를 나타내는 결과. 좌표는 (0, 0), 주소는 입력 그대로입니다.
    pub fn sentinel(address: &str) -> Self {
        Self {
            full_address: address.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            city: SENTINEL_CITY.to_string(),
            state: SENTINEL_STATE.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// 주소 변환 실패 사유
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeFailure {
    #[error("address is empty")]
    EmptyAddress,

    #[error("geocoding API key is not configured")]
    NotConfigured,

    #[error("geocoding request timed out")]
    Timeout,

    #[error("geocoding transport error: {0}")]
    Transport(String),

    #[error("geocoding API returned HTTP {0}")]
    HttpStatus(u16),

    #[error("geocoding API status {0}")]
    ApiStatus(String),

    #[error("geocoding API returned no results")]
    NoResults,

    #[error("geocoding response is missing {0}")]
    MissingField(&'static str),

    #[error("geocoding response could not be parsed: {0}")]
    Malformed(String),
}

/// Geocoding API 응답
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeApiResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, component_type: &str) -> bool {
        self.types.iter().any(|t| t == component_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_contract() {
        let sentinel = ResolvedAddress::sentinel("nowhere");
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.full_address, "nowhere");
        assert_eq!(sentinel.city, "city");
        assert_eq!(sentinel.state, "state");
    }

    #[test]
    fn test_only_both_zero_is_sentinel() {
        let mut resolved = ResolvedAddress::sentinel("x");
        resolved.latitude = 0.0;
        resolved.longitude = -97.7;
        assert!(!resolved.is_sentinel());
    }
}
