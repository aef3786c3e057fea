//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청 DTO를 검증하고,
//! 세션 미들웨어가 넣어 둔 [`RequestContext`](crate::domain::models::auth::RequestContext)와
//! 함께 서비스를 호출한 뒤 응답 DTO를 JSON으로 돌려줍니다.
//!
//! ```text
//! Client ──▶ SessionMiddleware ──▶ Handler ──▶ Service ──▶ Repository
//! ```
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, 에러는
//! `{"error": ..., "message": ...}` 형태로 변환됩니다.

pub mod auth;
pub mod home;
pub mod locations;
pub mod recommendations;
pub mod search;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use crate::core::errors::AppError;

/// 등록되지 않은 경로
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::debug!("404: {} {}", req.method(), req.path());
    Err(AppError::NotFound("The page you are looking for does not exist".to_string()))
}

/// 잘못된 JSON 본문을 `ValidationError`로 바꿉니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err: JsonPayloadError, _req| {
            AppError::ValidationError(format!("Invalid request body: {}", err)).into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_unknown_route_is_json_404() {
        let app = test::init_service(App::new().default_service(web::to(not_found))).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "not_found");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        async fn echo(body: web::Json<serde_json::Value>) -> HttpResponse {
            HttpResponse::Ok().json(body.into_inner())
        }

        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(echo)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
