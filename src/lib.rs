//! dateMeet 백엔드
//!
//! 데이트 장소 추천 서비스의 JSON API입니다. 사용자는 위치를 등록하고,
//! 같은 도시의 추천 글을 보고, 업체를 검색하고, 다른 사용자를 팔로우합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원 가입, 로그인, 프로필 수정, 회원 탈퇴 (연관 데이터 삭제)
//! - **세션**: Redis 세션 레코드 + 세션 ID를 담은 JWT (Bearer 헤더 또는 쿠키)
//! - **위치**: Geocoding API로 주소를 좌표와 도시/주로 변환
//! - **추천/좋아요**: 현재 위치와 같은 도시/주의 추천 글 노출
//! - **팔로우**: 단방향 팔로우 관계
//! - **업체 검색**: 현재 위치 주변 업체 검색
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Middleware    │ ← 세션 → RequestContext
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 외부 API
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (Store 트레이트)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
