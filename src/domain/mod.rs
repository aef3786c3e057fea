//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB에 저장되는 엔티티
//! ├── dto       - HTTP 요청/응답 본문
//! └── models    - 세션, 요청 컨텍스트, 외부 API 계약
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Redis
//! ```

pub mod entities;
pub mod dto;
pub mod models;
