//! # Session Configuration Module
//!
//! 세션 토큰(JWT)과 서버 측 세션 레코드 관련 설정을 관리합니다.
//!
//! 로그인 시 Redis에 세션 레코드(`session:{sid}`)를 만들고, 클라이언트에는
//! 세션 ID를 담은 서명된 JWT를 발급합니다. 토큰은 `Authorization: Bearer` 헤더나
//! 세션 쿠키로 전달됩니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export SESSION_TTL_SECONDS="86400"
//! export SESSION_COOKIE_NAME="datemeet_session"
//! export SESSION_COOKIE_SECURE="false"
//! ```

use std::env;

pub struct JwtConfig;

impl JwtConfig {
    /// 토큰 서명 비밀키
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "datemeet-secret-key".to_string()
            })
    }

    /// 토큰 만료 시간 (시간 단위, 기본 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(24)
    }
}

pub struct SessionConfig;

impl SessionConfig {
    /// Redis 세션 레코드 TTL (초)
    ///
    /// 설정이 없으면 토큰 만료 시간과 같게 맞춥니다.
    pub fn ttl_seconds() -> u64 {
        env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds >= 60)
            .unwrap_or_else(|| Self::ttl_for_token_hours(JwtConfig::expiration_hours()))
    }

    pub fn ttl_for_token_hours(hours: i64) -> u64 {
        u64::try_from(hours.max(1)).unwrap_or(24) * 3600
    }

    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "datemeet_session".to_string())
    }

    pub fn cookie_secure() -> bool {
        env::var("SESSION_COOKIE_SECURE")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_for_token_hours() {
        assert_eq!(SessionConfig::ttl_for_token_hours(24), 86_400);
        assert_eq!(SessionConfig::ttl_for_token_hours(1), 3_600);
        // 0 이하는 최소 1시간으로 보정
        assert_eq!(SessionConfig::ttl_for_token_hours(0), 3_600);
        assert_eq!(SessionConfig::ttl_for_token_hours(-5), 3_600);
    }

    #[test]
    fn test_defaults_without_env() {
        if env::var("SESSION_COOKIE_NAME").is_err() {
            assert_eq!(SessionConfig::cookie_name(), "datemeet_session");
        }
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }
    }
}
