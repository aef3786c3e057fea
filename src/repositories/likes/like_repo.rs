//! # 좋아요 리포지토리
//!
//! - **컬렉션**: `likes`
//! - **인덱스**: (user_id, recommendation_id) unique, recommendation_id
//!
//! 좋아요 추가는 `$setOnInsert` upsert 한 번으로 수행합니다. 확인과 삽입이
//! 하나의 원자적 연산이므로 같은 사용자의 동시 요청에도 행은 최대 하나입니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::AppResult,
    core::registry::Repository,
    db::Database,
    domain::entities::Like,
    repositories::{is_duplicate_key, stores::LikeStore},
};

#[repository(name = "like", collection = "likes")]
pub struct LikeRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl LikeRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "recommendation_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_recommendation_unique".to_string())
                .build())
            .build();

        let recommendation_index = IndexModel::builder()
            .keys(doc! { "recommendation_id": 1 })
            .options(IndexOptions::builder()
                .name("recommendation_id".to_string())
                .build())
            .build();

        self.collection::<Like>()
            .create_indexes([pair_index, recommendation_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl LikeStore for LikeRepository {
    async fn insert_if_absent(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Like>()
            .update_one(
                doc! { "user_id": *user_id, "recommendation_id": *recommendation_id },
                doc! { "$setOnInsert": {
                    "_id": ObjectId::new(),
                    "created_at": DateTime::now(),
                } },
            )
            .upsert(true)
            .await;

        match result {
            Ok(update) => Ok(update.upserted_id.is_some()),
            // 동시 upsert가 경합하면 한쪽은 고유 인덱스 위반으로 끝납니다.
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Like>()
            .delete_one(doc! { "user_id": *user_id, "recommendation_id": *recommendation_id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn exists(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool> {
        let count = self.collection::<Like>()
            .count_documents(doc! { "user_id": *user_id, "recommendation_id": *recommendation_id })
            .limit(1)
            .await?;

        Ok(count > 0)
    }

    async fn count_by_recommendation(&self, recommendation_id: &ObjectId) -> AppResult<u64> {
        Ok(self.collection::<Like>()
            .count_documents(doc! { "recommendation_id": *recommendation_id })
            .await?)
    }

    async fn count_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.collection::<Like>()
            .count_documents(doc! { "user_id": *user_id })
            .await?)
    }

    async fn recommendation_ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let cursor = self.collection::<Like>()
            .find(doc! { "user_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;

        let likes: Vec<Like> = cursor.try_collect().await?;
        Ok(likes.into_iter().map(|like| like.recommendation_id).collect())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<Like>()
            .delete_many(doc! { "user_id": *user_id })
            .await?;

        Ok(result.deleted_count)
    }

    async fn delete_by_recommendations(&self, recommendation_ids: &[ObjectId]) -> AppResult<u64> {
        if recommendation_ids.is_empty() {
            return Ok(0);
        }

        let result = self.collection::<Like>()
            .delete_many(doc! { "recommendation_id": { "$in": recommendation_ids.to_vec() } })
            .await?;

        Ok(result.deleted_count)
    }
}
