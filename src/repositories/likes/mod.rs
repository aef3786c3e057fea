//! 좋아요 데이터 액세스 계층

pub mod like_repo;
