//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository)는 MongoDB `users` 컬렉션과
//! Redis 캐시를 사용하며 `#[repository]` 매크로로 싱글톤 관리됩니다.

pub mod user_repo;
