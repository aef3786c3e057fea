//! # 비즈니스 검색 서비스
//!
//! 현재 위치 주소와 관심사 검색어로 주변 업체를 찾습니다.
//!
//! 요청 파라미터는 `term`, `limit`(50), `radius`(40km), `offset`, `location`이며
//! `offset`은 `BUSINESS_SEARCH_OFFSET`으로 바꿀 수 있습니다(기본 50).
//! 외부 API 장애는 모두 `SearchUnavailable`로 변환됩니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;

use crate::config::BusinessSearchConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::search::{Business, BusinessSearchResponse};
use crate::services::external::http_client;

pub struct BusinessSearchService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    offset: u32,
}

static BUSINESS_SEARCH_SERVICE_INSTANCE: OnceCell<Arc<BusinessSearchService>> = OnceCell::new();

fn unavailable(reason: impl std::fmt::Display) -> AppError {
    log::error!("비즈니스 검색 실패: {}", reason);
    AppError::SearchUnavailable("Business search is temporarily unavailable".to_string())
}

impl BusinessSearchService {
    pub fn new(client: reqwest::Client, api_url: String, api_key: String, offset: u32) -> Self {
        Self { client, api_url, api_key, offset }
    }

    pub fn instance() -> Arc<Self> {
        BUSINESS_SEARCH_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    http_client(),
                    BusinessSearchConfig::api_url(),
                    BusinessSearchConfig::api_key(),
                    BusinessSearchConfig::offset(),
                ))
            })
            .clone()
    }

    pub fn query_params(&self, address: &str, term: &str) -> Vec<(&'static str, String)> {
        vec![
            ("term", term.trim().to_string()),
            ("limit", BusinessSearchConfig::PAGE_SIZE.to_string()),
            ("radius", BusinessSearchConfig::RADIUS_METERS.to_string()),
            ("offset", self.offset.to_string()),
            ("location", address.trim().to_string()),
        ]
    }

    pub async fn search(&self, address: &str, term: &str) -> AppResult<Vec<Business>> {
        if term.trim().is_empty() {
            return Err(AppError::ValidationError("Please enter an interest".to_string()));
        }
        if self.api_key.is_empty() {
            return Err(unavailable("API key is not configured"));
        }

        let response = self.client
            .get(&self.api_url)
            .bearer_auth(&self.api_key)
            .query(&self.query_params(address, term))
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {}", status)));
        }

        let body = response
            .json::<BusinessSearchResponse>()
            .await
            .map_err(unavailable)?;

        log::info!("비즈니스 검색 '{}' @ {}: {}건", term.trim(), address, body.businesses.len());
        Ok(body.businesses)
    }
}
