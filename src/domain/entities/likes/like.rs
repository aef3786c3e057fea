//! Like Entity
//!
//! 사용자와 추천 글 사이의 좋아요 관계. `(user_id, recommendation_id)` 쌍은 유일합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub recommendation_id: ObjectId,
    pub created_at: DateTime,
}

impl Like {
    pub fn new(user_id: ObjectId, recommendation_id: ObjectId) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            recommendation_id,
            created_at: DateTime::now(),
        }
    }
}
