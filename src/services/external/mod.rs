//! # External API Clients
//!
//! Geocoding API와 비즈니스 검색 API 클라이언트입니다. 두 클라이언트는
//! 타임아웃이 설정된 하나의 `reqwest::Client`를 공유합니다.

pub mod geocode_service;
pub mod business_search_service;

pub use geocode_service::*;
pub use business_search_service::*;

use once_cell::sync::Lazy;

use crate::config::HttpClientConfig;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(HttpClientConfig::timeout())
        .user_agent(concat!("datemeet/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::error!("HTTP 클라이언트 생성 실패, 기본 설정 사용: {}", e);
            reqwest::Client::new()
        })
});

/// 외부 API 호출에 사용하는 공유 HTTP 클라이언트
pub fn http_client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}
