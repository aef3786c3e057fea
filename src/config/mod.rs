//! # Configuration Module
//!
//! 백엔드 서비스의 설정값을 환경 변수에서 읽어 중앙에서 관리합니다.
//! 설정 구조체는 상태를 갖지 않으며, 필요할 때마다 환경 변수를 읽고
//! 값이 없거나 형식이 잘못된 경우 기본값을 사용합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 환경, 비밀번호 해싱, Rate Limiting 설정
//! - [`auth_config`] - 세션 토큰(JWT)과 세션 레코드 설정
//! - [`api_config`] - Geocoding / 비즈니스 검색 API 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, ServerConfig, JwtConfig};
//!
//! let env = Environment::current();
//! let address = ServerConfig::bind_address();
//! let secret = JwtConfig::secret();
//! ```
//!
//! ## 환경 변수
//!
//! ```bash
//! # 서버
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # 세션
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export SESSION_TTL_SECONDS="86400"
//!
//! # 보안
//! export BCRYPT_COST="12"          # 4-15 범위
//!
//! # 외부 API
//! export GEOCODE_API_KEY="..."
//! export BUSINESS_SEARCH_API_KEY="..."
//! ```

pub mod data_config;
pub mod auth_config;
pub mod api_config;

pub use data_config::*;
pub use auth_config::*;
pub use api_config::*;
