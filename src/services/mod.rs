//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `OnceCell` 싱글톤으로 관리되며, 저장소는 [`Stores`](crate::repositories::Stores)의
//! 트레이트 객체로 주입받습니다. 테스트에서는 같은 서비스를 메모리 저장소로 구성합니다.
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, recommendations::RecommendationService};
//!
//! let user_service = UserService::instance();
//! let feed = RecommendationService::instance().home_feed(&context).await?;
//! ```

pub mod auth;
pub mod external;
pub mod follows;
pub mod locations;
pub mod recommendations;
pub mod users;

#[cfg(test)]
pub(crate) mod fixtures;
