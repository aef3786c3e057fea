//! # 사용자 리포지토리 구현
//!
//! MongoDB를 주 저장소로, Redis를 ID 조회 캐시로 사용합니다.
//!
//! - **컬렉션**: `users`
//! - **인덱스**: email(unique), username(unique), created_at(desc)
//! - **캐시**: `user:{id}`, TTL 10분. 수정/삭제 시 무효화

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document, Regex},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::errors::{AppError, AppResult},
    core::registry::Repository,
    db::Database,
    domain::entities::{ProfileChanges, User},
    repositories::{is_duplicate_key, stores::UserStore},
    utils::string_utils::escape_regex,
};

const USER_CACHE_TTL: usize = 600;

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn duplicate_identity() -> AppError {
    AppError::DuplicateIdentity("Username or e-mail already exists".to_string())
}

/// 캐시 무효화 실패를 경고로 남깁니다. 실패했으면 `true`.
///
/// 무효화에 실패한 항목은 `USER_CACHE_TTL` 동안 이전 값으로 조회됩니다.
fn report_cache_failure<T, E: std::fmt::Display>(result: Result<T, E>, target: &str) -> bool {
    match result {
        Ok(_) => false,
        Err(e) => {
            log::warn!("⚠️ 사용자 캐시 무효화 실패 ({}): {}", target, e);
            true
        }
    }
}

fn profile_update_document(changes: &ProfileChanges) -> Document {
    let mut set = doc! { "updated_at": DateTime::now() };
    if let Some(username) = &changes.username {
        set.insert("username", username);
    }
    if let Some(email) = &changes.email {
        set.insert("email", email);
    }
    if let Some(first_name) = &changes.first_name {
        set.insert("first_name", first_name);
    }
    if let Some(last_name) = &changes.last_name {
        set.insert("last_name", last_name);
    }
    if let Some(bio) = &changes.bio {
        set.insert("bio", bio);
    }
    if let Some(image_url) = &changes.image_url {
        set.insert("image_url", image_url);
    }
    if let Some(header_image_url) = &changes.header_image_url {
        set.insert("header_image_url", header_image_url);
    }
    set
}

impl UserRepository {
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, username_index, created_at_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": *id })
            .await?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, USER_CACHE_TTL)
                .await;
        }

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.collection::<User>()
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection::<User>()
            .find_one(doc! { "email": email })
            .await?)
    }

    async fn find_many_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<User>()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .sort(doc! { "username": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn search_by_username(&self, query: Option<&str>, limit: i64) -> AppResult<Vec<User>> {
        let filter = match query {
            Some(q) => doc! {
                "username": Regex {
                    pattern: escape_regex(q),
                    options: "i".to_string(),
                }
            },
            None => doc! {},
        };

        let cursor = self.collection::<User>()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, user: User) -> AppResult<User> {
        match self.collection::<User>().insert_one(&user).await {
            Ok(_) => {
                report_cache_failure(self.invalidate_collection_cache(None).await, "users");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(duplicate_identity()),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_profile(&self, id: &ObjectId, changes: &ProfileChanges) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": profile_update_document(changes) },
            )
            .with_options(options)
            .await;

        match updated {
            Ok(user) => {
                if user.is_some() {
                    report_cache_failure(self.invalidate_cache(&id.to_hex()).await, &id.to_hex());
                }
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(duplicate_identity()),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection::<User>()
            .delete_one(doc! { "_id": *id })
            .await?;

        if result.deleted_count > 0 {
            report_cache_failure(self.invalidate_cache(&id.to_hex()).await, &id.to_hex());
            report_cache_failure(self.invalidate_collection_cache(None).await, "users");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_document_only_sets_given_fields() {
        let changes = ProfileChanges {
            username: Some("alice2".to_string()),
            bio: Some("hello".to_string()),
            ..Default::default()
        };

        let set = profile_update_document(&changes);
        assert_eq!(set.get_str("username").unwrap(), "alice2");
        assert_eq!(set.get_str("bio").unwrap(), "hello");
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("email"));
        assert!(!set.contains_key("password_hash"));
    }

    #[test]
    fn test_cache_invalidation_failure_is_reported() {
        assert!(!report_cache_failure(Ok::<(), String>(()), "users"));
        assert!(report_cache_failure(Err::<(), _>("connection refused"), "users"));
    }
}
