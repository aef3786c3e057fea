//! 팔로우 데이터 액세스 계층

pub mod follow_repo;
