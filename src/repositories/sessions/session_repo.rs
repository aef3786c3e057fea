//! # 세션 리포지토리
//!
//! 로그인 세션을 Redis `session:{sid}` 키에 TTL과 함께 저장합니다.
//! 로그아웃과 계정 삭제는 키를 지워 세션을 즉시 무효화합니다.

use std::sync::Arc;
use async_trait::async_trait;
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::AppResult,
    core::registry::Repository,
    domain::models::auth::SessionData,
    repositories::stores::SessionStore,
};

#[repository(name = "session", collection = "sessions")]
pub struct SessionRepository {
    redis: Arc<RedisClient>,
}

pub fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn save(&self, session_id: &str, data: &SessionData, ttl_seconds: u64) -> AppResult<()> {
        self.redis
            .set_with_expiry(&session_key(session_id), data, ttl_seconds as usize)
            .await?;
        Ok(())
    }

    async fn find(&self, session_id: &str) -> AppResult<Option<SessionData>> {
        Ok(self.redis.get::<SessionData>(&session_key(session_id)).await?)
    }

    async fn delete(&self, session_id: &str) -> AppResult<()> {
        self.redis.del(&session_key(session_id)).await?;
        Ok(())
    }
}
