//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 계층이 같은 에러 타입을
//! 공유하도록 합니다. 요청 하나에서 발생한 실패는 그 요청에만 영향을 주며,
//! 사용자에게는 스택 트레이스가 아닌 메시지로 전달됩니다.
//!
//! ## 에러 분류
//!
//! | Variant | HTTP | 의미 |
//! |---------|------|------|
//! | `ValidationError` | 400 | 입력값 검증 실패 |
//! | `InvalidOperation` | 400 | 허용되지 않는 동작 (예: 자기 자신 팔로우) |
//! | `InvalidAddress` | 422 | 주소 좌표 변환 실패 (센티널 좌표) |
//! | `Unauthorized` | 401 | 세션에 로그인 사용자가 없음 |
//! | `Forbidden` | 403 | 로그인했지만 권한 없음 |
//! | `NotFound` | 404 | ID로 찾은 엔티티가 없음 |
//! | `DuplicateIdentity` | 409 | 사용자명/이메일 중복 |
//! | `SearchUnavailable` | 503 | 외부 비즈니스 검색 API 장애 |
//! | `DatabaseError` / `RedisError` / `InternalError` | 500 | 인프라 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! fn ensure_rating(rating: i32) -> AppResult<()> {
//!     if !(1..=5).contains(&rating) {
//!         return Err(AppError::ValidationError("평점은 1-5 사이여야 합니다".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 허용되지 않는 동작 (400)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// 주소 변환 실패 (422)
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// 로그인 필요 (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 없음 (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 사용자명/이메일 중복 (409)
    #[error("Duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// 외부 비즈니스 검색 API 장애 (503)
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 기계 판독용 코드
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database_error",
            AppError::RedisError(_) => "redis_error",
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidOperation(_) => "invalid_operation",
            AppError::InvalidAddress(_) => "invalid_address",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::DuplicateIdentity(_) => "duplicate_identity",
            AppError::SearchUnavailable(_) => "search_unavailable",
            AppError::InternalError(_) => "internal_error",
        }
    }

    /// 사용자에게 노출해도 되는 메시지
    ///
    /// 인프라 계층 에러는 내부 정보가 섞여 있으므로 일반 메시지로 대체합니다.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                "요청을 처리하는 중 서버 오류가 발생했습니다".to_string()
            }
            AppError::ValidationError(msg)
            | AppError::InvalidOperation(msg)
            | AppError::InvalidAddress(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::DuplicateIdentity(msg)
            | AppError::SearchUnavailable(msg) => msg.clone(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidAddress(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateIdentity(_) => StatusCode::CONFLICT,
            AppError::SearchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.kind(),
            "message": self.user_message(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}
