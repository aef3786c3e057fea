//! # User HTTP Handlers
//!
//! 사용자 검색, 프로필, 팔로우 관계, 사용자별 추천/좋아요 목록, 내 계정 수정/탈퇴.
//! 모든 경로는 로그인이 필요합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::recommendations::response::RecommendationResponse;
use crate::domain::dto::users::request::{UpdateProfileRequest, UserSearchQuery};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::RequestContext;
use crate::handlers::auth::removal_cookie;
use crate::services::follows::FollowService;
use crate::services::recommendations::RecommendationService;
use crate::services::users::UserService;

#[get("")]
pub async fn search_users(
    context: RequestContext,
    query: web::Query<UserSearchQuery>,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;

    let users = UserService::instance().search_users(query.q.as_deref()).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(users))
}

#[patch("/me")]
pub async fn update_profile(
    context: RequestContext,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let user = context.require_user()?;
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (changes, password) = payload.into_inner().into_parts();
    let updated = UserService::instance()
        .update_profile(user, changes, &password)
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

#[delete("/me")]
pub async fn delete_account(
    context: RequestContext,
) -> Result<HttpResponse, AppError> {
    let user = context.require_user()?;
    UserService::instance()
        .delete_account(user, context.session_id.as_deref())
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(json!({ "message": "Your account has been deleted." })))
}

#[get("/{user_id}")]
pub async fn get_profile(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let viewer = context.require_user()?;
    let profile = UserService::instance().get_profile(viewer, &user_id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[get("/{user_id}/followers")]
pub async fn list_followers(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;
    let users = FollowService::instance().followers(&user_id).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}/following")]
pub async fn list_following(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;
    let users = FollowService::instance().following(&user_id).await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}/likes")]
pub async fn list_likes(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;
    let liked = RecommendationService::instance().liked_by(&user_id).await?;
    let liked: Vec<RecommendationResponse> = liked.iter().map(RecommendationResponse::from).collect();

    Ok(HttpResponse::Ok().json(liked))
}

#[get("/{user_id}/recommendations")]
pub async fn list_recommendations(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    context.require_user()?;
    let authored = RecommendationService::instance().list_by_user(&user_id).await?;
    let authored: Vec<RecommendationResponse> = authored.iter().map(RecommendationResponse::from).collect();

    Ok(HttpResponse::Ok().json(authored))
}

#[post("/{user_id}/follow")]
pub async fn follow(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = context.require_user()?;
    let target = FollowService::instance().follow(actor, &user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "user_id": target.id_string(),
        "following": true
    })))
}

#[delete("/{user_id}/follow")]
pub async fn unfollow(
    context: RequestContext,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let actor = context.require_user()?;
    let target = FollowService::instance().unfollow(actor, &user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "user_id": target.id_string(),
        "following": false
    })))
}
