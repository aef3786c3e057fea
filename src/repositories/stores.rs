//! # 저장소 추상화
//!
//! 서비스 계층은 구체 리포지토리 대신 이 트레이트들에 의존합니다.
//! 운영 환경에서는 MongoDB/Redis 리포지토리가, 테스트에서는 메모리 저장소가
//! 같은 트레이트를 구현합니다.
//!
//! ```text
//! UserService ──▶ Arc<dyn UserStore> ──▶ UserRepository (MongoDB + Redis 캐시)
//!                                   └──▶ InMemoryStore  (#[cfg(test)])
//! ```

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::{
    Location, LocationUpdate, ProfileChanges, Recommendation, User,
};
use crate::domain::models::auth::SessionData;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_many_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<User>>;

    /// 사용자명 부분 일치 검색 (대소문자 무시). `None`이면 전체를 최신순으로.
    async fn search_by_username(&self, query: Option<&str>, limit: i64) -> AppResult<Vec<User>>;

    /// 고유 인덱스 위반 시 `DuplicateIdentity`
    async fn create(&self, user: User) -> AppResult<User>;

    /// 고유 인덱스 위반 시 `DuplicateIdentity`
    async fn update_profile(&self, id: &ObjectId, changes: &ProfileChanges) -> AppResult<Option<User>>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;
}

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Location>>;

    /// 최신 등록순
    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Location>>;

    async fn create(&self, location: Location) -> AppResult<Location>;

    async fn update(&self, id: &ObjectId, update: &LocationUpdate) -> AppResult<Option<Location>>;

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Recommendation>>;

    /// 작성자 기준, 최신순
    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Recommendation>>;

    /// 최신순
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Recommendation>>;

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<Recommendation>>;

    /// 업체 도시/주가 일치하는 추천 (대소문자 무시, 최신순)
    async fn find_by_city_state(&self, city: &str, state: &str, limit: i64) -> AppResult<Vec<Recommendation>>;

    async fn create(&self, recommendation: Recommendation) -> AppResult<Recommendation>;

    async fn delete(&self, id: &ObjectId) -> AppResult<bool>;

    async fn ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>>;

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;

    async fn count_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// 이미 있으면 아무것도 하지 않고 `false`
    async fn insert_if_absent(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool>;

    /// 없으면 `false`
    async fn remove(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool>;

    async fn exists(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool>;

    async fn count_by_recommendation(&self, recommendation_id: &ObjectId) -> AppResult<u64>;

    async fn count_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;

    /// 좋아요한 추천 ID, 최근 좋아요 순
    async fn recommendation_ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>>;

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64>;

    async fn delete_by_recommendations(&self, recommendation_ids: &[ObjectId]) -> AppResult<u64>;
}

#[async_trait]
pub trait FollowStore: Send + Sync {
    /// 이미 있으면 `false`
    async fn insert_if_absent(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool>;

    async fn remove(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool>;

    async fn exists(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool>;

    /// `user_id`를 팔로우하는 사용자들
    async fn follower_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>>;

    /// `user_id`가 팔로우하는 사용자들
    async fn following_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>>;

    async fn count_followers(&self, user_id: &ObjectId) -> AppResult<u64>;

    async fn count_following(&self, user_id: &ObjectId) -> AppResult<u64>;

    /// 양방향 모두 삭제
    async fn delete_involving(&self, user_id: &ObjectId) -> AppResult<u64>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session_id: &str, data: &SessionData, ttl_seconds: u64) -> AppResult<()>;

    async fn find(&self, session_id: &str) -> AppResult<Option<SessionData>>;

    async fn delete(&self, session_id: &str) -> AppResult<()>;
}

/// 서비스에 주입되는 저장소 묶음
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub locations: Arc<dyn LocationStore>,
    pub recommendations: Arc<dyn RecommendationStore>,
    pub likes: Arc<dyn LikeStore>,
    pub follows: Arc<dyn FollowStore>,
    pub sessions: Arc<dyn SessionStore>,
}

impl Stores {
    /// 레지스트리에 등록된 MongoDB/Redis 리포지토리로 구성합니다.
    pub fn registered() -> Self {
        use crate::repositories::{
            follows::follow_repo::FollowRepository,
            likes::like_repo::LikeRepository,
            locations::location_repo::LocationRepository,
            recommendations::recommendation_repo::RecommendationRepository,
            sessions::session_repo::SessionRepository,
            users::user_repo::UserRepository,
        };

        Self {
            users: UserRepository::instance(),
            locations: LocationRepository::instance(),
            recommendations: RecommendationRepository::instance(),
            likes: LikeRepository::instance(),
            follows: FollowRepository::instance(),
            sessions: SessionRepository::instance(),
        }
    }
}
