//! 세션 레코드 저장소 (Redis)

pub mod session_repo;
