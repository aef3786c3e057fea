//! 위치 데이터 액세스 계층

pub mod location_repo;
