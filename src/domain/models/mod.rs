//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 외부 API 계약 모델입니다.
//!
//! - [`auth`] - 세션 레코드, 세션 토큰 클레임, 요청 컨텍스트
//! - [`geo`] - Geocoding 결과와 실패 사유
//! - [`search`] - 비즈니스 검색 API 응답 모델

pub mod auth;
pub mod geo;
pub mod search;
