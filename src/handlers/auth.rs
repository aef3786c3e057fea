//! # Authentication HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/v1/auth/register` | 회원 가입 후 바로 로그인 |
//! | `POST` | `/api/v1/auth/login` | 로그인 |
//! | `POST` | `/api/v1/auth/logout` | 로그아웃 (세션 삭제) |
//!
//! 로그인 응답은 본문에 토큰을 담고, 같은 토큰을 HttpOnly 세션 쿠키로도 설정합니다.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::SessionConfig;
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{LoginRequest, RegisterRequest};
use crate::domain::dto::users::response::LoginResponse;
use crate::domain::entities::User;
use crate::domain::models::auth::RequestContext;
use crate::middlewares::SessionMiddleware;
use crate::services::auth::SessionService;
use crate::services::users::UserService;

fn session_cookie(token: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(SessionConfig::cookie_name(), token.to_string())
        .path("/")
        .http_only(true)
        .secure(SessionConfig::cookie_secure())
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SessionConfig::cookie_name(), "")
        .path("/")
        .finish();
    cookie.make_removal();
    cookie
}

async fn start_session(user: &User, message: String) -> Result<(LoginResponse, Cookie<'static>), AppError> {
    let issued = SessionService::instance().login(user).await?;
    let cookie = session_cookie(&issued.token, issued.expires_in);
    Ok((
        LoginResponse::new(user, issued.token, issued.expires_in, message),
        cookie,
    ))
}

#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let (profile, password) = payload.into_inner().into_parts();
    let user = UserService::instance().register(profile, password).await?;

    let (response, cookie) = start_session(&user, format!("Welcome, {}!", user.username)).await?;
    Ok(HttpResponse::Created().cookie(cookie).json(response))
}

#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::instance()
        .authenticate(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials.".to_string()))?;

    log::info!("로그인 성공 - 사용자: {}", user.username);

    let (response, cookie) = start_session(&user, format!("Welcome, {}!", user.username)).await?;
    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}

#[post("/logout", wrap = "SessionMiddleware::required()")]
pub async fn logout(
    context: RequestContext,
) -> Result<HttpResponse, AppError> {
    let session_id = context.require_session()?;
    SessionService::instance().logout(session_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(json!({
            "message": "You have successfully logged out of the dateMeet app."
        })))
}
