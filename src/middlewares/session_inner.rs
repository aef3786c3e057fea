//! SessionMiddleware 세션 해석 로직
use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::config::SessionConfig;
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthMode;
use crate::services::auth::SessionService;

/// 실제 세션 해석을 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub sessions: Arc<SessionService>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;
        let sessions = self.sessions.clone();

        Box::pin(async move {
            let token = extract_session_token(&req);

            let context = match sessions.resolve(token.as_deref()).await {
                Ok(context) => context,
                Err(err) => {
                    log::error!("세션 해석 실패: {}", err);
                    return Ok(reject(req, &err));
                }
            };

            if mode == AuthMode::Required && !context.is_authenticated() {
                log::debug!("로그인 필요: {} {}", req.method(), req.path());
                let err = AppError::Unauthorized("Access unauthorized. Please log in".to_string());
                return Ok(reject(req, &err));
            }

            if let Some(user) = &context.user {
                log::debug!("세션 사용자: {}", user.username);
            }
            req.extensions_mut().insert(context);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: &AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, err.error_response()).map_into_right_body()
}

/// `Authorization: Bearer` 헤더를 먼저 보고, 없으면 세션 쿠키를 봅니다.
fn extract_session_token(req: &ServiceRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    from_header.or_else(|| {
        req.cookie(&SessionConfig::cookie_name())
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}
