//! 세션 인증 서비스 모듈
//!
//! - [`TokenService`] - 세션 ID를 담은 HS256 JWT 발급/검증
//! - [`SessionService`] - Redis 세션 레코드 기반 로그인, 현재 사용자/위치 해석, 로그아웃

pub mod token_service;
pub mod session_service;

pub use token_service::*;
pub use session_service::*;
