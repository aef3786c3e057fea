//! 위치 관리 서비스 모듈

pub mod location_service;

pub use location_service::*;
