//! 세션 모델
//!
//! 세션은 Redis의 `session:{sid}` 레코드이며, 클라이언트는 세션 ID를 담은
//! 서명된 토큰만 보관합니다. 로그아웃은 레코드를 삭제하므로 사용자와 위치
//! 바인딩이 함께 사라집니다.

use serde::{Deserialize, Serialize};

/// Redis에 저장되는 세션 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// 로그인 사용자 ID (hex)
    pub user_id: String,
    /// 현재 위치 ID (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// 생성 시각 (Unix timestamp)
    pub created_at: i64,
}

impl SessionData {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            location_id: None,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_location(mut self, location_id: Option<String>) -> Self {
        self.location_id = location_id;
        self
    }
}

/// 세션 토큰(JWT) 클레임
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 사용자 ID
    pub sub: String,
    /// 세션 ID
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인 결과
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: String,
    pub token: String,
    /// 토큰 유효 시간 (초)
    pub expires_in: i64,
}

/// 세션 미들웨어의 인증 요구 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 로그인 사용자가 없으면 401
    Required,
    /// 익명 요청도 통과
    Optional,
}
