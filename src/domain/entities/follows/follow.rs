//! Follow Entity
//!
//! 방향이 있는 팔로우 관계입니다. `user_following_id`가 `user_being_followed_id`를
//! 팔로우하며, 두 ID 쌍은 유일합니다. 자기 자신 팔로우는 서비스에서 거부합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 팔로우 당하는 사용자
    pub user_being_followed_id: ObjectId,
    /// 팔로우 하는 사용자
    pub user_following_id: ObjectId,
    pub created_at: DateTime,
}

impl Follow {
    pub fn new(follower: ObjectId, followed: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            user_being_followed_id: followed,
            user_following_id: follower,
            created_at: DateTime::now(),
        }
    }

    pub fn involves(&self, user_id: &ObjectId) -> bool {
        &self.user_being_followed_id == user_id || &self.user_following_id == user_id
    }
}
