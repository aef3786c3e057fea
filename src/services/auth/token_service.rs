//! 세션 토큰 서비스
//!
//! 세션 ID를 HS256으로 서명한 JWT에 담아 발급하고 검증합니다.
//! 토큰 자체에는 권한 정보가 없으며, 실제 세션 상태는 Redis 레코드에 있습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::models::auth::SessionClaims;

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self { secret, expiration_hours }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::secret(), JwtConfig::expiration_hours())
    }

    /// 토큰 유효 시간 (초)
    pub fn expires_in(&self) -> i64 {
        self.expiration_hours * 3600
    }

    /// 사용자/세션 ID로 토큰을 발급합니다.
    pub fn issue(&self, user_id: &str, session_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::hours(self.expiration_hours);

        let claims = SessionClaims {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
    }

    /// 서명과 만료를 검증합니다. 유효하지 않은 토큰은 `None`.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());

        match decode::<SessionClaims>(token, &decoding_key, &Validation::default()) {
            Ok(token_data) => Some(token_data.claims),
            Err(e) => {
                log::debug!("세션 토큰 검증 실패: {}", e);
                None
            }
        }
    }
}
