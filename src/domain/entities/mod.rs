//! # Domain Entities Module
//!
//! MongoDB 컬렉션에 저장되는 영속 엔티티들입니다.
//!
//! | 엔티티 | 컬렉션 | 고유 인덱스 |
//! |--------|--------|-------------|
//! | [`User`](users::User) | `users` | `username`, `email` |
//! | [`Location`](locations::Location) | `locations` | - |
//! | [`Recommendation`](recommendations::Recommendation) | `recommendations` | - |
//! | [`Like`](likes::Like) | `likes` | `(user_id, recommendation_id)` |
//! | [`Follow`](follows::Follow) | `follows` | `(user_following_id, user_being_followed_id)` |
//!
//! 모든 엔티티는 애플리케이션에서 `ObjectId::new()`로 ID를 만든 뒤 저장합니다.
//! 사용자 삭제 시의 연쇄 삭제는 서비스 계층에서 명시적으로 수행합니다.

pub mod users;
pub mod locations;
pub mod recommendations;
pub mod likes;
pub mod follows;

pub use users::*;
pub use locations::*;
pub use recommendations::*;
pub use likes::*;
pub use follows::*;
