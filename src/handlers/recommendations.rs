//! # Recommendation HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/api/v1/recommendations` | 현재 위치 근처 추천 (위치가 없으면 최신순) |
//! | `POST` | `/api/v1/recommendations` | 추천 글 작성 |
//! | `GET` | `/api/v1/recommendations/{id}` | 추천 글 상세 |
//! | `DELETE` | `/api/v1/recommendations/{id}` | 추천 글 삭제 (작성자만) |
//! | `POST` | `/api/v1/recommendations/{id}/like` | 좋아요 |
//! | `DELETE` | `/api/v1/recommendations/{id}/like` | 좋아요 취소 |

use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::recommendations::request::CreateRecommendationRequest;
use crate::domain::dto::recommendations::response::RecommendationResponse;
use crate::domain::models::auth::RequestContext;
use crate::services::recommendations::RecommendationService;

#[get("")]
pub async fn list_visible(
    context: RequestContext,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;
    let service = RecommendationService::instance();

    let recommendations = match &context.location {
        Some(location) => service.recommendations_near(location).await?,
        None => service.recent().await?,
    };
    let recommendations: Vec<RecommendationResponse> =
        recommendations.iter().map(RecommendationResponse::from).collect();

    Ok(HttpResponse::Ok().json(recommendations))
}

#[post("")]
pub async fn create_recommendation(
    context: RequestContext,
    payload: web::Json<CreateRecommendationRequest>,
) -> Result<HttpResponse, AppError> {
    let author = context.require_user()?;
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (title, content, business) = payload.into_inner().into_parts();
    let recommendation = RecommendationService::instance()
        .add_recommendation(author, &title, &content, business)
        .await?;

    Ok(HttpResponse::Created().json(RecommendationResponse::from(recommendation)))
}

#[get("/{recommendation_id}")]
pub async fn get_recommendation(
    context: RequestContext,
    recommendation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let viewer = context.require_user()?;
    let detail = RecommendationService::instance()
        .get_recommendation(viewer, &recommendation_id)
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

#[delete("/{recommendation_id}")]
pub async fn delete_recommendation(
    context: RequestContext,
    recommendation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = context.require_user()?;
    RecommendationService::instance()
        .delete_recommendation(actor, &recommendation_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[post("/{recommendation_id}/like")]
pub async fn like(
    context: RequestContext,
    recommendation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = context.require_user()?;
    let status = RecommendationService::instance()
        .like(actor, &recommendation_id)
        .await?;

    Ok(HttpResponse::Ok().json(status))
}

#[delete("/{recommendation_id}/like")]
pub async fn unlike(
    context: RequestContext,
    recommendation_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = context.require_user()?;
    let status = RecommendationService::instance()
        .unlike(actor, &recommendation_id)
        .await?;

    Ok(HttpResponse::Ok().json(status))
}
