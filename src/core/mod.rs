//! # Core Framework Module
//!
//! 서비스 전반에서 공유하는 기반 기능을 모아둔 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 인프라 컴포넌트(Database, RedisClient)와
//!   `#[repository]` 매크로로 선언된 리포지토리의 싱글톤 관리
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 등록
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! ServiceLocator::set(database);
//! ServiceLocator::set(redis_client);
//! ServiceLocator::initialize_all().await?;
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
