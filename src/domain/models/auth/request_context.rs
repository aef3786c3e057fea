//! 요청 컨텍스트
//!
//! 세션 미들웨어가 요청마다 한 번 해석한 현재 사용자와 현재 위치를 담아
//! request extensions에 넣고, 핸들러는 추출자로 받아 서비스에 전달합니다.

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Location, User};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session_id: Option<String>,
    pub user: Option<User>,
    /// 사용자가 있을 때만 채워지며, 그 사용자 소유의 위치만 들어갑니다.
    pub location: Option<Location>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// 로그인 사용자 (없으면 `Unauthorized`)
    pub fn require_user(&self) -> AppResult<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Access unauthorized. Please log in".to_string()))
    }

    /// 현재 위치 (없으면 `InvalidOperation`)
    pub fn require_location(&self) -> AppResult<&Location> {
        self.location.as_ref().ok_or_else(|| {
            AppError::InvalidOperation("Please add or select a location first".to_string())
        })
    }

    pub fn require_session(&self) -> AppResult<&str> {
        self.session_id
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Access unauthorized. Please log in".to_string()))
    }
}

/// 미들웨어가 컨텍스트를 넣지 않은 경로에서는 익명 컨텍스트를 돌려줍니다.
impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_anonymous_context_rejects_user_scoped_access() {
        let context = RequestContext::anonymous();
        assert!(!context.is_authenticated());
        assert!(matches!(context.require_user(), Err(AppError::Unauthorized(_))));
        assert!(matches!(context.require_location(), Err(AppError::InvalidOperation(_))));
        assert!(matches!(context.require_session(), Err(AppError::Unauthorized(_))));
    }

    #[actix_web::test]
    async fn test_extractor_defaults_to_anonymous() {
        let req = TestRequest::default().to_http_request();
        let context = RequestContext::extract(&req).await.unwrap();
        assert!(context.user.is_none());
        assert!(context.session_id.is_none());
    }

    #[actix_web::test]
    async fn test_extractor_reads_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(RequestContext {
            session_id: Some("sid-1".to_string()),
            user: None,
            location: None,
        });

        let context = RequestContext::extract(&req).await.unwrap();
        assert_eq!(context.session_id.as_deref(), Some("sid-1"));
    }
}
