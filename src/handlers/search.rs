//! # Business Search HTTP Handler
//!
//! 현재 위치의 주소와 관심사로 주변 업체를 검색합니다.

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::locations::response::LocationResponse;
use crate::domain::dto::search::request::BusinessSearchRequest;
use crate::domain::models::auth::RequestContext;
use crate::services::external::BusinessSearchService;

#[post("/businesses")]
pub async fn search_businesses(
    context: RequestContext,
    payload: web::Json<BusinessSearchRequest>,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;
    let location = context.require_location()?;
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let businesses = BusinessSearchService::instance()
        .search(&location.address, &payload.interest)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "location": LocationResponse::from(location),
        "interest": payload.interest,
        "businesses": businesses
    })))
}
