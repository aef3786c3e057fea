use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::AuthMode;
use crate::middlewares::session_inner::SessionMiddlewareService;
use crate::services::auth::SessionService;

/// 요청마다 세션 토큰을 해석해 [`RequestContext`](crate::domain::models::auth::RequestContext)를
/// request extensions에 넣는 미들웨어
pub struct SessionMiddleware {
    mode: AuthMode,
    sessions: Arc<SessionService>,
}

impl SessionMiddleware {
    pub fn new(mode: AuthMode, sessions: Arc<SessionService>) -> Self {
        Self { mode, sessions }
    }

    pub fn required() -> Self {
        Self::new(AuthMode::Required, SessionService::instance())
    }

    pub fn optional() -> Self {
        Self::new(AuthMode::Optional, SessionService::instance())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
            sessions: self.sessions.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use crate::core::errors::AppError;
    use crate::domain::models::auth::RequestContext;
    use crate::repositories::memory::InMemoryStore;
    use crate::services::fixtures::{seed_user, tokens};

    async fn whoami(context: RequestContext) -> Result<HttpResponse, AppError> {
        let name = context
            .user
            .map(|user| user.username)
            .unwrap_or_else(|| "anonymous".to_string());
        Ok(HttpResponse::Ok().body(name))
    }

    async fn setup() -> (Arc<SessionService>, String) {
        let memory = InMemoryStore::new();
        let stores = memory.stores();
        let sessions = Arc::new(SessionService::new(&stores, tokens(), 3600));
        let alice = seed_user(&stores, "alice").await;
        let issued = sessions.login(&alice).await.unwrap();
        (sessions, issued.token)
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_anonymous() {
        let (sessions, _) = setup().await;
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(AuthMode::Required, sessions))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_bearer_header_and_cookie_are_accepted() {
        let (sessions, token) = setup().await;
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(AuthMode::Required, sessions))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let by_header = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, by_header).await;
        assert_eq!(body, "alice");

        let by_cookie = test::TestRequest::get()
            .uri("/")
            .cookie(actix_web::cookie::Cookie::new("datemeet_session", token))
            .to_request();
        let body = test::call_and_read_body(&app, by_cookie).await;
        assert_eq!(body, "alice");
    }

    #[actix_web::test]
    async fn test_optional_mode_passes_anonymous_through() {
        let (sessions, _) = setup().await;
        let app = test::init_service(
            App::new()
                .wrap(SessionMiddleware::new(AuthMode::Optional, sessions))
                .route("/", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }
}
