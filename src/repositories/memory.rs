//! 테스트용 메모리 저장소
//!
//! 모든 저장소 트레이트를 하나의 구조체로 구현합니다. MongoDB 리포지토리와 같은
//! 고유성 규칙(사용자명/이메일, 좋아요 쌍, 팔로우 쌍)을 지킵니다.

use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::{
    Follow, Like, Location, LocationUpdate, ProfileChanges, Recommendation, User,
};
use crate::domain::models::auth::SessionData;
use crate::repositories::stores::{
    FollowStore, LikeStore, LocationStore, RecommendationStore, SessionStore, Stores, UserStore,
};

#[derive(Default)]
pub struct InMemoryStore {
    pub users: Mutex<Vec<User>>,
    pub locations: Mutex<Vec<Location>>,
    pub recommendations: Mutex<Vec<Recommendation>>,
    pub likes: Mutex<Vec<Like>>,
    pub follows: Mutex<Vec<Follow>>,
    pub sessions: Mutex<Vec<(String, SessionData)>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn stores(self: &Arc<Self>) -> Stores {
        Stores {
            users: self.clone(),
            locations: self.clone(),
            recommendations: self.clone(),
            likes: self.clone(),
            follows: self.clone(),
            sessions: self.clone(),
        }
    }

    pub fn like_rows(&self) -> Vec<Like> {
        self.likes.lock().unwrap().clone()
    }

    pub fn follow_rows(&self) -> Vec<Follow> {
        self.follows.lock().unwrap().clone()
    }
}

fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> mongodb::bson::DateTime,
{
    // 같은 밀리초에 생성된 항목은 나중에 넣은 것이 앞에 오도록
    items.reverse();
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_many_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn search_by_username(&self, query: Option<&str>, limit: i64) -> AppResult<Vec<User>> {
        let needle = query.map(|q| q.to_lowercase());
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| match &needle {
                Some(needle) => u.username.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        newest_first(&mut users, |u| u.created_at);
        users.truncate(limit.max(0) as usize);
        Ok(users)
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username || u.email == user.email) {
            return Err(AppError::DuplicateIdentity("Username or e-mail already exists".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(&self, id: &ObjectId, changes: &ProfileChanges) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let clash = users.iter().any(|u| {
            &u.id != id
                && (changes.username.as_deref() == Some(u.username.as_str())
                    || changes.email.as_deref() == Some(u.email.as_str()))
        });
        if clash {
            return Err(AppError::DuplicateIdentity("Username or e-mail already exists".to_string()));
        }

        Ok(users.iter_mut().find(|u| &u.id == id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.id != id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Location>> {
        Ok(self.locations.lock().unwrap().iter().find(|l| &l.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Location>> {
        let mut locations: Vec<Location> = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut locations, |l| l.created_at);
        Ok(locations)
    }

    async fn create(&self, location: Location) -> AppResult<Location> {
        self.locations.lock().unwrap().push(location.clone());
        Ok(location)
    }

    async fn update(&self, id: &ObjectId, update: &LocationUpdate) -> AppResult<Option<Location>> {
        let mut locations = self.locations.lock().unwrap();
        Ok(locations.iter_mut().find(|l| &l.id == id).map(|location| {
            location.apply(update);
            location.clone()
        }))
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut locations = self.locations.lock().unwrap();
        let before = locations.len();
        locations.retain(|l| &l.user_id != user_id);
        Ok((before - locations.len()) as u64)
    }
}

#[async_trait]
impl RecommendationStore for InMemoryStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Recommendation>> {
        Ok(self.recommendations.lock().unwrap().iter().find(|r| &r.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<Recommendation>> {
        let mut recommendations: Vec<Recommendation> = self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_authored_by(user_id))
            .cloned()
            .collect();
        newest_first(&mut recommendations, |r| r.created_at);
        Ok(recommendations)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Recommendation>> {
        let mut recommendations: Vec<Recommendation> = self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect();
        newest_first(&mut recommendations, |r| r.created_at);
        Ok(recommendations)
    }

    async fn find_recent(&self, limit: i64) -> AppResult<Vec<Recommendation>> {
        let mut recommendations = self.recommendations.lock().unwrap().clone();
        newest_first(&mut recommendations, |r| r.created_at);
        recommendations.truncate(limit.max(0) as usize);
        Ok(recommendations)
    }

    async fn find_by_city_state(&self, city: &str, state: &str, limit: i64) -> AppResult<Vec<Recommendation>> {
        let mut recommendations: Vec<Recommendation> = self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_in(city, state))
            .cloned()
            .collect();
        newest_first(&mut recommendations, |r| r.created_at);
        recommendations.truncate(limit.max(0) as usize);
        Ok(recommendations)
    }

    async fn create(&self, recommendation: Recommendation) -> AppResult<Recommendation> {
        self.recommendations.lock().unwrap().push(recommendation.clone());
        Ok(recommendation)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut recommendations = self.recommendations.lock().unwrap();
        let before = recommendations.len();
        recommendations.retain(|r| &r.id != id);
        Ok(recommendations.len() < before)
    }

    async fn ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_authored_by(user_id))
            .map(|r| r.id)
            .collect())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut recommendations = self.recommendations.lock().unwrap();
        let before = recommendations.len();
        recommendations.retain(|r| !r.is_authored_by(user_id));
        Ok((before - recommendations.len()) as u64)
    }

    async fn count_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.is_authored_by(user_id))
            .count() as u64)
    }
}

#[async_trait]
impl LikeStore for InMemoryStore {
    async fn insert_if_absent(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool> {
        let mut likes = self.likes.lock().unwrap();
        if likes
            .iter()
            .any(|l| &l.user_id == user_id && &l.recommendation_id == recommendation_id)
        {
            return Ok(false);
        }
        likes.push(Like::new(*user_id, *recommendation_id));
        Ok(true)
    }

    async fn remove(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool> {
        let mut likes = self.likes.lock().unwrap();
        let before = likes.len();
        likes.retain(|l| !(&l.user_id == user_id && &l.recommendation_id == recommendation_id));
        Ok(likes.len() < before)
    }

    async fn exists(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<bool> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .any(|l| &l.user_id == user_id && &l.recommendation_id == recommendation_id))
    }

    async fn count_by_recommendation(&self, recommendation_id: &ObjectId) -> AppResult<u64> {
        Ok(self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.recommendation_id == recommendation_id)
            .count() as u64)
    }

    async fn count_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.likes.lock().unwrap().iter().filter(|l| &l.user_id == user_id).count() as u64)
    }

    async fn recommendation_ids_by_user(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        let mut likes: Vec<Like> = self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| &l.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut likes, |l| l.created_at);
        Ok(likes.into_iter().map(|l| l.recommendation_id).collect())
    }

    async fn delete_by_user(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut likes = self.likes.lock().unwrap();
        let before = likes.len();
        likes.retain(|l| &l.user_id != user_id);
        Ok((before - likes.len()) as u64)
    }

    async fn delete_by_recommendations(&self, recommendation_ids: &[ObjectId]) -> AppResult<u64> {
        let mut likes = self.likes.lock().unwrap();
        let before = likes.len();
        likes.retain(|l| !recommendation_ids.contains(&l.recommendation_id));
        Ok((before - likes.len()) as u64)
    }
}

#[async_trait]
impl FollowStore for InMemoryStore {
    async fn insert_if_absent(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        let mut follows = self.follows.lock().unwrap();
        if follows
            .iter()
            .any(|f| &f.user_following_id == follower && &f.user_being_followed_id == followed)
        {
            return Ok(false);
        }
        follows.push(Follow::new(*follower, *followed));
        Ok(true)
    }

    async fn remove(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        let mut follows = self.follows.lock().unwrap();
        let before = follows.len();
        follows.retain(|f| !(&f.user_following_id == follower && &f.user_being_followed_id == followed));
        Ok(follows.len() < before)
    }

    async fn exists(&self, follower: &ObjectId, followed: &ObjectId) -> AppResult<bool> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .any(|f| &f.user_following_id == follower && &f.user_being_followed_id == followed))
    }

    async fn follower_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| &f.user_being_followed_id == user_id)
            .map(|f| f.user_following_id)
            .collect())
    }

    async fn following_ids(&self, user_id: &ObjectId) -> AppResult<Vec<ObjectId>> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| &f.user_following_id == user_id)
            .map(|f| f.user_being_followed_id)
            .collect())
    }

    async fn count_followers(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.follower_ids(user_id).await?.len() as u64)
    }

    async fn count_following(&self, user_id: &ObjectId) -> AppResult<u64> {
        Ok(self.following_ids(user_id).await?.len() as u64)
    }

    async fn delete_involving(&self, user_id: &ObjectId) -> AppResult<u64> {
        let mut follows = self.follows.lock().unwrap();
        let before = follows.len();
        follows.retain(|f| !f.involves(user_id));
        Ok((before - follows.len()) as u64)
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn save(&self, session_id: &str, data: &SessionData, _ttl_seconds: u64) -> AppResult<()> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|(sid, _)| sid != session_id);
        sessions.push((session_id.to_string(), data.clone()));
        Ok(())
    }

    async fn find(&self, session_id: &str) -> AppResult<Option<SessionData>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|(sid, _)| sid == session_id)
            .map(|(_, data)| data.clone()))
    }

    async fn delete(&self, session_id: &str) -> AppResult<()> {
        self.sessions.lock().unwrap().retain(|(sid, _)| sid != session_id);
        Ok(())
    }
}
