//! # Location HTTP Handlers
//!
//! 현재 위치 조회/등록/수정, 저장된 위치 목록, 현재 위치 선택.

use actix_web::{get, post, put, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::locations::request::LocationRequest;
use crate::domain::dto::locations::response::LocationResponse;
use crate::domain::models::auth::RequestContext;
use crate::services::locations::LocationService;

#[get("/current")]
pub async fn current_location(
    context: RequestContext,
) -> Result<HttpResponse, AppError> {
    let location = LocationService::instance().current_location(&context)?;

    Ok(HttpResponse::Ok().json(json!({
        "location": location.map(LocationResponse::from)
    })))
}

#[post("/current")]
pub async fn add_location(
    context: RequestContext,
    payload: web::Json<LocationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let location = LocationService::instance()
        .add_location(&context, request.name, &request.address)
        .await?;

    Ok(HttpResponse::Created().json(LocationResponse::from(location)))
}

#[put("/current")]
pub async fn update_current_location(
    context: RequestContext,
    payload: web::Json<LocationRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let request = payload.into_inner();
    let location = LocationService::instance()
        .update_current_location(&context, request.name, &request.address)
        .await?;

    Ok(HttpResponse::Ok().json(LocationResponse::from(location)))
}

#[get("")]
pub async fn list_locations(
    context: RequestContext,
) -> Result<HttpResponse, AppError> {
    let locations = LocationService::instance().list_locations(&context).await?;
    let locations: Vec<LocationResponse> = locations.into_iter().map(LocationResponse::from).collect();

    Ok(HttpResponse::Ok().json(locations))
}

#[put("/{location_id}/select")]
pub async fn select_location(
    context: RequestContext,
    location_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let location = LocationService::instance()
        .select_location(&context, &location_id)
        .await?;

    Ok(HttpResponse::Ok().json(LocationResponse::from(location)))
}
