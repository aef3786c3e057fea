//! # 팔로우 리포지토리
//!
//! - **컬렉션**: `follows`
//! - **인덱스**: (user_following_id, user_being_followed_id) unique,
//!   user_being_followed_id
//!
//! 팔로우 관계 존재 여부는 고유 인덱스를 사용하는 단건 조회로 확인합니다.

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
    domain::entities::Follow,
    repositories::{is_duplicate_key, stores::FollowStore},
};

#[repository(name = "follow", collection = "follows")]
pub struct FollowRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl FollowRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "user_following_id": 1, "user_being_followed_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("follower_followed_unique".to_string())
                .build())
            .build();

        let followed_index = IndexModel::builder()
            .keys(doc! { "user_being_followed_id": 1 })
            .options(IndexOptions::builder()
                .name("user_being_followed_id".to_string())
                .build())
            .build();

        self.collection::<Follow>()
            .create_indexes([pair_index, followed_index])
            .await?;

        Ok(())
    }

    fn edge(follower: &ObjectId, followed: &ObjectId) -> mongodb::bson::Document {
        doc! { "user_following_id": *follower, "user_being_followed_id": *followed }
    }
}

#[async_trait]
impl FollowStore for FollowRepository {
    async fn insert_if_absent(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Follow>()
            .update_one(
                Self::edge(follower, followed),
                doc! { "$setOnInsert": {
                    "_id": ObjectId::new(),
                    "created_at": DateTime::now(),
                } },
            )
            .upsert(true)
            .await;

        match result {
            Ok(update) => Ok(update.upserted_id.is_some()),
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Follow>()
            .delete_one(Self::edge(follower, followed))
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn exists(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        let edge = self.collection::<Follow>()
            .find_one(Self::edge(follower, followed))
            .await?;

        Ok(edge.is_some())
    }

    async fn follower_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let cursor = self.collection::<Follow>()
            .find(doc! { "user_being_followed_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;

        let edges: Vec<Follow> = cursor.try_collect().await?;
        Ok(edges.into_iter().map(|edge| edge.user_following_id).collect())
    }

    async fn following_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let cursor = self.collection::<Follow>()
            .find(doc! { "user_following_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;

        let edges: Vec<Follow> = cursor.try_collect().await?;
        Ok(edges.into_iter().map(|edge| edge.user_being_followed_id).collect())
    }

    async fn count_followers(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.collection::<Follow>()
            .count_documents(doc! { "user_being_followed_id": *user_id })
            .await?)
    }

    async fn count_following(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.collection::<Follow>()
            .count_documents(doc! { "user_following_id": *user_id })
            .await?)
    }

    async fn delete_involving(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<Follow>()
            .delete_many(doc! { "$or": [
                { "user_following_id": *user_id },
                { "user_being_followed_id": *user_id },
            ] })
            .await?;

        Ok(result.deleted_count)
    }
}
