//! # 세션 서비스
//!
//! 로그인 세션의 생성, 해석, 위치 바인딩, 종료를 담당합니다.
//!
//! ```text
//! login ──▶ session:{sid} = { user_id }        ──▶ JWT { sub, sid }
//! resolve(JWT) ──▶ session:{sid} ──▶ User (+ 소유한 Location)
//! bind_location ──▶ session:{sid} = { user_id, location_id }
//! logout ──▶ DEL session:{sid}
//! ```
//!
//! 토큰이 유효하지 않거나 세션 레코드가 없으면 익명 컨텍스트가 됩니다.
//! 저장소 오류만 에러로 전파됩니다.

use std::any::Any;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{Location, User};
use crate::domain::models::auth::{IssuedSession, RequestContext, SessionData};
use crate::repositories::{LocationStore, SessionStore, Stores, UserStore};
use crate::services::auth::TokenService;

pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserStore>,
    locations: Arc<dyn LocationStore>,
    tokens: TokenService,
    ttl_seconds: u64,
}

static SESSION_SERVICE_INSTANCE: OnceCell<Arc<SessionService>> = OnceCell::new();

impl SessionService {
    pub fn new(stores: &Stores, tokens: TokenService, ttl_seconds: u64) -> Self {
        Self {
            sessions: stores.sessions.clone(),
            users: stores.users.clone(),
            locations: stores.locations.clone(),
            tokens,
            ttl_seconds,
        }
    }

    pub fn instance() -> Arc<Self> {
        SESSION_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    &Stores::registered(),
                    TokenService::from_env(),
                    SessionConfig::ttl_seconds(),
                ))
            })
            .clone()
    }

    /// 새 세션을 만들고 토큰을 발급합니다.
    pub async fn login(&self, user: &User) -> AppResult<IssuedSession> {
        let session_id = Uuid::new_v4().to_string();
        let data = SessionData::new(user.id_string());

        self.sessions
            .save(&session_id, &data, self.ttl_seconds)
            .await?;

        let token = self.tokens.issue(&data.user_id, &session_id)?;

        log::info!("🔑 로그인 세션 생성: user={}", user.username);

        Ok(IssuedSession {
            session_id,
            token,
            expires_in: self.tokens.expires_in(),
        })
    }

    /// 토큰으로 현재 사용자와 현재 위치를 해석합니다.
    pub async fn resolve(&self, token: Option<&str>) -> AppResult<RequestContext> {
        let Some(claims) = token.and_then(|token| self.tokens.verify(token)) else {
            return Ok(RequestContext::anonymous());
        };

        let Some(data) = self.sessions.find(&claims.sid).await? else {
            log::debug!("세션 레코드 없음: {}", claims.sid);
            return Ok(RequestContext::anonymous());
        };

        if data.user_id != claims.sub {
            log::warn!("세션 사용자 불일치: sid={}", claims.sid);
            return Ok(RequestContext::anonymous());
        }

        let user = match ObjectId::parse_str(&data.user_id) {
            Ok(user_id) => self.users.find_by_id(&user_id).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            // 탈퇴한 사용자의 세션
            self.sessions.delete(&claims.sid).await?;
            return Ok(RequestContext::anonymous());
        };

        let location = self.owned_location(&user, data.location_id.as_deref()).await?;

        Ok(RequestContext {
            session_id: Some(claims.sid),
            user: Some(user),
            location,
        })
    }

    async fn owned_location(&self, user: &User, location_id: Option<&str>) -> AppResult<Option<Location>> {
        let Some(location_id) = location_id.and_then(|id| ObjectId::parse_str(id).ok()) else {
            return Ok(None);
        };

        Ok(self
            .locations
            .find_by_id(&location_id)
            .await?
            .filter(|location| location.is_owned_by(&user.id)))
    }

    async fn active_session(&self, session_id: &str) -> AppResult<SessionData> {
        self.sessions
            .find(session_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session expired. Please log in again".to_string()))
    }

    /// 요청 처리 중 세션이 만료되거나 삭제되었으면 `Unauthorized`
    pub async fn ensure_active(&self, context: &RequestContext) -> AppResult<()> {
        context.require_user()?;
        self.active_session(context.require_session()?).await?;
        Ok(())
    }

    /// 세션의 현재 위치를 바꿉니다.
    pub async fn bind_location(&self, context: &RequestContext, location: &Location) -> AppResult<()> {
        let user = context.require_user()?;
        if !location.is_owned_by(&user.id) {
            return Err(AppError::Forbidden("You can only select your own locations".to_string()));
        }

        let session_id = context.require_session()?;
        let data = self
            .active_session(session_id)
            .await?
            .with_location(Some(location.id.to_hex()));

        self.sessions.save(session_id, &data, self.ttl_seconds).await
    }

    /// 세션을 삭제합니다. 사용자와 위치 바인딩이 함께 사라집니다.
    pub async fn logout(&self, session_id: &str) -> AppResult<()> {
        self.sessions.delete(session_id).await?;
        log::info!("👋 로그아웃: session={}", session_id);
        Ok(())
    }
}

fn construct_session_service() -> Box<dyn Any + Send + Sync> {
    Box::new(SessionService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "session_service",
        constructor: construct_session_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryStore;
    use crate::services::fixtures::{seed_location, seed_user, tokens};

    fn service(memory: &Arc<InMemoryStore>) -> SessionService {
        SessionService::new(&memory.stores(), tokens(), 3600)
    }

    #[actix_web::test]
    async fn test_login_then_resolve_returns_user() {
        let memory = InMemoryStore::new();
        let sessions = service(&memory);
        let alice = seed_user(&memory.stores(), "alice").await;

        let issued = sessions.login(&alice).await.unwrap();
        let context = sessions.resolve(Some(&issued.token)).await.unwrap();

        assert_eq!(context.user.unwrap().id, alice.id);
        assert_eq!(context.session_id.as_deref(), Some(issued.session_id.as_str()));
        assert!(context.location.is_none());
        assert_eq!(issued.expires_in, 3600);
    }

    #[actix_web::test]
    async fn test_invalid_or_missing_token_is_anonymous() {
        let memory = InMemoryStore::new();
        let sessions = service(&memory);

        assert!(!sessions.resolve(None).await.unwrap().is_authenticated());
        assert!(!sessions.resolve(Some("garbage")).await.unwrap().is_authenticated());
    }

    #[actix_web::test]
    async fn test_logout_clears_user_and_location() {
        let memory = InMemoryStore::new();
        let stores = memory.stores();
        let sessions = service(&memory);
        let alice = seed_user(&stores, "alice").await;
        let home = seed_location(&stores, &alice, "Austin", "TX").await;

        let issued = sessions.login(&alice).await.unwrap();
        let context = sessions.resolve(Some(&issued.token)).await.unwrap();
        sessions.bind_location(&context, &home).await.unwrap();

        let bound = sessions.resolve(Some(&issued.token)).await.unwrap();
        assert_eq!(bound.location.unwrap().id, home.id);

        sessions.logout(&issued.session_id).await.unwrap();
        let after = sessions.resolve(Some(&issued.token)).await.unwrap();
        assert!(after.user.is_none());
        assert!(after.location.is_none());
    }

    #[actix_web::test]
    async fn test_cannot_bind_someone_elses_location() {
        let memory = InMemoryStore::new();
        let stores = memory.stores();
        let sessions = service(&memory);
        let alice = seed_user(&stores, "alice").await;
        let bob = seed_user(&stores, "bob").await;
        let bobs_place = seed_location(&stores, &bob, "Denver", "CO").await;

        let issued = sessions.login(&alice).await.unwrap();
        let context = sessions.resolve(Some(&issued.token)).await.unwrap();

        let result = sessions.bind_location(&context, &bobs_place).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[actix_web::test]
    async fn test_session_of_deleted_user_is_dropped() {
        let memory = InMemoryStore::new();
        let stores = memory.stores();
        let sessions = service(&memory);
        let alice = seed_user(&stores, "alice").await;

        let issued = sessions.login(&alice).await.unwrap();
        stores.users.delete(&alice.id).await.unwrap();

        let context = sessions.resolve(Some(&issued.token)).await.unwrap();
        assert!(!context.is_authenticated());
        assert!(stores.sessions.find(&issued.session_id).await.unwrap().is_none());
    }
}
