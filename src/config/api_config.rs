//! 외부 API 연동 설정
//!
//! 주소 좌표 변환(Geocoding)과 비즈니스 검색 API의 키, 엔드포인트, 요청 파라미터를
//! 환경 변수에서 읽어옵니다.
//!
//! ```bash
//! export GEOCODE_API_KEY="..."
//! export GEOCODE_API_URL="https://maps.googleapis.com/maps/api/geocode/json"
//! export BUSINESS_SEARCH_API_KEY="..."
//! export BUSINESS_SEARCH_API_URL="https://api.yelp.com/v3/businesses/search"
//! export BUSINESS_SEARCH_OFFSET="50"
//! export HTTP_TIMEOUT_SECONDS="5"
//! ```

use std::env;
use std::time::Duration;

pub struct GeocodeConfig;

impl GeocodeConfig {
    pub fn api_key() -> String {
        env::var("GEOCODE_API_KEY").unwrap_or_else(|_| {
            log::warn!("GEOCODE_API_KEY not set, geocoding requests will be rejected");
            String::new()
        })
    }

    pub fn api_url() -> String {
        env::var("GEOCODE_API_URL")
            .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api/geocode/json".to_string())
    }
}

pub struct BusinessSearchConfig;

impl BusinessSearchConfig {
    /// 한 번에 가져오는 결과 수
    pub const PAGE_SIZE: u32 = 50;

    /// 검색 반경 (미터)
    pub const RADIUS_METERS: u32 = 40_000;

    pub fn api_key() -> String {
        env::var("BUSINESS_SEARCH_API_KEY").unwrap_or_else(|_| {
            log::warn!("BUSINESS_SEARCH_API_KEY not set, business search will be unavailable");
            String::new()
        })
    }

    pub fn api_url() -> String {
        env::var("BUSINESS_SEARCH_API_URL")
            .unwrap_or_else(|_| "https://api.yelp.com/v3/businesses/search".to_string())
    }

    /// 결과 시작 위치 (기본 50)
    pub fn offset() -> u32 {
        env::var("BUSINESS_SEARCH_OFFSET")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(50)
    }
}

pub struct HttpClientConfig;

impl HttpClientConfig {
    /// 외부 API 요청 타임아웃 (기본 5초)
    pub fn timeout() -> Duration {
        let seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .unwrap_or(5);
        Duration::from_secs(seconds)
    }
}
