//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, ObjectId 파싱, 정규식 이스케이프
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{validate_required_string, parse_object_id};
//!
//! let username = validate_required_string("  alice  ", "username")?;
//! let user_id = parse_object_id(&path, "User")?;
//! ```

pub mod string_utils;
