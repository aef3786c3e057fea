//! # 팔로우 서비스
//!
//! 팔로우 관계는 "팔로워 → 팔로우 대상" 방향의 간선 하나로 저장합니다.
//! (팔로워, 대상) 쌍에는 고유 인덱스가 있어 같은 팔로우는 한 번만 저장됩니다.

use std::any::Any;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::User;
use crate::repositories::Stores;
use crate::utils::string_utils::parse_object_id;

pub struct FollowService {
    stores: Stores,
}

static FOLLOW_SERVICE_INSTANCE: OnceCell<Arc<FollowService>> = OnceCell::new();

impl FollowService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn instance() -> Arc<Self> {
        FOLLOW_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(Stores::registered())))
            .clone()
    }

    async fn existing_user(&self, user_id: &str) -> AppResult<User> {
        let id = parse_object_id(user_id, "User")?;
        self.stores
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 팔로우. 자기 자신은 팔로우할 수 없고, 이미 팔로우 중이면 그대로 둡니다.
    pub async fn follow(&self, actor: &User, target_id: &str) -> AppResult<User> {
        let target = self.existing_user(target_id).await?;

        if target.id == actor.id {
            return Err(AppError::InvalidOperation("You cannot follow yourself".to_string()));
        }

        if self.stores.follows.insert_if_absent(&actor.id, &target.id).await? {
            log::info!("👥 {} → {} 팔로우", actor.username, target.username);
        }
        Ok(target)
    }

    /// 언팔로우. 팔로우하지 않은 상태면 아무것도 하지 않습니다.
    pub async fn unfollow(&self, actor: &User, target_id: &str) -> AppResult<User> {
        let target = self.existing_user(target_id).await?;

        if self.stores.follows.remove(&actor.id, &target.id).await? {
            log::info!("👋 {} → {} 언팔로우", actor.username, target.username);
        }
        Ok(target)
    }

    /// `follower`가 `followed`를 팔로우하는지
    pub async fn is_following(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        self.stores.follows.exists(follower, followed).await
    }

    /// `user`가 `other`에게 팔로우되고 있는지
    pub async fn is_followed_by(&self, user: &ObjectId, other: &ObjectId) -> AppResult<bool> {
        self.stores.follows.exists(other, user).await
    }

    pub async fn followers(&self, user_id: &str) -> AppResult<Vec<User>> {
        let user = self.existing_user(user_id).await?;
        let ids = self.stores.follows.follower_ids(&user.id).await?;
        self.stores.users.find_many_by_ids(&ids).await
    }

    pub async fn following(&self, user_id: &str) -> AppResult<Vec<User>> {
        let user = self.existing_user(user_id).await?;
        let ids = self.stores.follows.following_ids(&user.id).await?;
        self.stores.users.find_many_by_ids(&ids).await
    }
}

fn construct_follow_service() -> Box<dyn Any + Send + Sync> {
    Box::new(FollowService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "follow_service",
        constructor: construct_follow_service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryStore;
    use crate::services::fixtures::seed_user;

    #[actix_web::test]
    async fn test_cannot_follow_yourself() {
        let memory = InMemoryStore::new();
        let service = FollowService::new(memory.stores());
        let alice = seed_user(&memory.stores(), "alice").await;

        let result = service.follow(&alice, &alice.id_string()).await;
        assert!(matches!(result, Err(AppError::InvalidOperation(_))));
        assert!(memory.follow_rows().is_empty());
    }

    #[actix_web::test]
    async fn test_follow_is_visible_from_both_sides() {
        let memory = InMemoryStore::new();
        let stores = memory.stores();
        let service = FollowService::new(stores.clone());
        let alice = seed_user(&stores, "alice").await;
        let bob = seed_user(&stores, "bob").await;

        service.follow(&alice, &bob.id_string()).await.unwrap();

        assert!(service.is_following(&alice.id, &bob.id).await.unwrap());
        assert!(service.is_followed_by(&bob.id, &alice.id).await.unwrap());
        assert!(!service.is_following(&bob.id, &alice.id).await.unwrap());

        let followers = service.followers(&bob.id_string()).await.unwrap();
        assert_eq!(followers.len(), 1);
        assert_eq!(followers[0].id, alice.id);

        let following = service.following(&alice.id_string()).await.unwrap();
        assert_eq!(following[0].id, bob.id);
    }

    #[actix_web::test]
    async fn test_follow_is_idempotent_and_unfollow_removes_edge() {
        let memory = InMemoryStore::new();
        let stores = memory.stores();
        let service = FollowService::new(stores.clone());
        let alice = seed_user(&stores, "alice").await;
        let bob = seed_user(&stores, "bob").await;

        service.follow(&alice, &bob.id_string()).await.unwrap();
        service.follow(&alice, &bob.id_string()).await.unwrap();
        assert_eq!(memory.follow_rows().len(), 1);

        service.unfollow(&alice, &bob.id_string()).await.unwrap();
        service.unfollow(&alice, &bob.id_string()).await.unwrap();
        assert!(memory.follow_rows().is_empty());
    }

    #[actix_web::test]
    async fn test_follow_missing_user_is_not_found() {
        let memory = InMemoryStore::new();
        let service = FollowService::new(memory.stores());
        let alice = seed_user(&memory.stores(), "alice").await;

        let result = service.follow(&alice, &ObjectId::new().to_hex()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
