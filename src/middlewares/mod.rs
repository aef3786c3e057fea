//! 미들웨어 모듈
//!
//! # 세션 미들웨어 (SessionMiddleware)
//! - `Authorization: Bearer` 헤더 또는 세션 쿠키에서 토큰 추출
//! - 현재 사용자와 현재 위치를 `RequestContext`로 request extension에 저장
//! - 필수/선택 모드 지원
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::SessionMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1/users")
//!             .wrap(SessionMiddleware::required())
//!             .service(search_users)
//!     )
//! ```

pub mod session_middleware;
mod session_inner;

pub use session_middleware::SessionMiddleware;
