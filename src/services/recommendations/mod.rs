//! 추천 글/좋아요 서비스 모듈

pub mod recommendation_service;

pub use recommendation_service::*;
