//! # Repository Layer
//!
//! MongoDB 컬렉션과 Redis 세션 저장소에 대한 데이터 액세스 계층입니다.
//! 각 리포지토리는 `#[repository]` 매크로로 싱글톤 관리되며, 서비스는
//! [`stores`]의 트레이트를 통해 접근합니다.
//!
//! ```rust,ignore
//! use crate::repositories::users::user_repo::UserRepository;
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_username("alice").await?;
//! ```

pub mod stores;
pub mod users;
pub mod locations;
pub mod recommendations;
pub mod likes;
pub mod follows;
pub mod sessions;

#[cfg(test)]
pub mod memory;

pub use stores::*;

use mongodb::error::{ErrorKind, WriteFailure};

use crate::core::errors::AppResult;

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 고유 인덱스 위반 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

/// 모든 컬렉션의 인덱스를 생성합니다.
///
/// 좋아요/팔로우 중복 방지가 고유 인덱스에 의존하므로 서버 시작 전에 호출합니다.
pub async fn create_all_indexes() -> AppResult<()> {
    users::user_repo::UserRepository::instance().create_indexes().await?;
    locations::location_repo::LocationRepository::instance().create_indexes().await?;
    recommendations::recommendation_repo::RecommendationRepository::instance().create_indexes().await?;
    likes::like_repo::LikeRepository::instance().create_indexes().await?;
    follows::follow_repo::FollowRepository::instance().create_indexes().await?;

    log::info!("✅ MongoDB 인덱스 생성 완료");
    Ok(())
}
