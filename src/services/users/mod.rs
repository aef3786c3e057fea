//! 사용자 관리 서비스 모듈
//!
//! 회원 가입, 로그인 자격 증명 확인, 프로필, 사용자 검색, 회원 탈퇴를 제공합니다.

pub mod user_service;

pub use user_service::*;
