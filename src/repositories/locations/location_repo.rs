//! # 위치 리포지토리
//!
//! - **컬렉션**: `locations`
//! - **인덱스**: (user_id, created_at desc)

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::AppResult,
    core::registry::Repository,
    db::Database,
    domain::entities::{Location, LocationUpdate},
    repositories::stores::LocationStore,
};

#[repository(name = "location", collection = "locations")]
pub struct LocationRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl LocationRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at".to_string())
                .build())
            .build();

        self.collection::<Location>()
            .create_indexes([user_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl LocationStore for LocationRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Location>> {
        Ok(self.collection::<Location>()
            .find_one(doc! { "_id": *id })
            .await?)
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Location>> {
        let cursor = self.collection::<Location>()
            .find(doc! { "user_id": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, location: Location) -> AppResult<Location> {
        self.collection::<Location>()
            .insert_one(&location)
            .await?;

        Ok(location)
    }

    async fn update(&self, id: &ObjectId, update: &LocationUpdate) -> AppResult<Option<Location>> {
        let mut set = doc! {
            "address": &update.resolved.full_address,
            "latitude": update.resolved.latitude,
            "longitude": update.resolved.longitude,
            "city": &update.resolved.city,
            "state": &update.resolved.state,
        };
        if let Some(name) = &update.name {
            set.insert("name", name);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self.collection::<Location>()
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set })
            .with_options(options)
            .await?)
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let result = self.collection::<Location>()
            .delete_many(doc! { "user_id": *user_id })
            .await?;

        Ok(result.deleted_count)
    }
}
