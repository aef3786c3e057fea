//! # 추천 글 리포지토리
//!
//! - **컬렉션**: `recommendations`
//! - **인덱스**: (user_id, created_at desc), created_at desc,
//!   (business_city, business_state) 대소문자 무시 collation
//!
//! 도시/주 필터는 인덱스와 같은 collation(`en`, strength 2)으로 조회하므로
//! "Austin"과 "austin"이 같은 값으로 취급됩니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{Collation, CollationStrength, IndexOptions},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::AppResult,
    core::registry::Repository,
    db::Database,
    domain::entities::Recommendation,
    repositories::stores::RecommendationStore,
};

#[repository(name = "recommendation", collection = "recommendations")]
pub struct RecommendationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn case_insensitive() -> Collation {
    Collation::builder()
        .locale("en".to_string())
        .strength(CollationStrength::Secondary)
        .build()
}

impl RecommendationRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let author_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let place_index = IndexModel::builder()
            .keys(doc! { "business_city": 1, "business_state": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("business_city_state_ci".to_string())
                .collation(case_insensitive())
                .build())
            .build();

        self.collection::<Recommendation>()
            .create_indexes([author_index, created_at_index, place_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl RecommendationStore for RecommendationRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Recommendation>> {
        Ok(self.collection::<Recommendation>()
            .find_one(doc! { "_id": *id })
            .await?)
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Recommendation>> {
        let cursor = self.collection::<Recommendation>()
            .find(doc! { "user_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Recommendation>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<Recommendation>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<Recommendation>> {
        let cursor = self.collection::<Recommendation>()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_city_state(&self, city: &str, state: &str, limit: i64) -> AppResult<Vec<Recommendation>> {
        let cursor = self.collection::<Recommendation>()
            .find(doc! {
                "business_city": city.trim(),
                "business_state": state.trim(),
            })
            .collation(case_insensitive())
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, recommendation: Recommendation) -> AppResult<Recommendation> {
        self.collection::<Recommendation>()
            .insert_one(&recommendation)
            .await?;

        Ok(recommendation)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<Recommendation>()
            .delete_one(doc! { "_id": *id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    async fn ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let recommendations = RecommendationStore::find_by_user(self, user_id).await?;
        Ok(recommendations.into_iter().map(|r| r.id).collect())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<Recommendation>()
            .delete_many(doc! { "user_id": *user_id })
            .await?;

        Ok(result.deleted_count)
    }

    async fn count_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.collection::<Recommendation>()
            .count_documents(doc! { "user_id": *user_id })
            .await?)
    }
}
