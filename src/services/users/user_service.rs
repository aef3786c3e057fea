//! # 사용자 서비스
//!
//! 회원 가입, 자격 증명 확인, 프로필 조회/수정, 사용자 검색, 회원 탈퇴를 담당합니다.
//!
//! ## 비밀번호
//!
//! bcrypt 해싱과 검증은 CPU를 오래 쓰므로 `web::block`으로 블로킹 스레드 풀에서
//! 실행합니다. cost는 [`PasswordConfig::bcrypt_cost`]가 환경별로 정합니다.
//!
//! ## 회원 탈퇴 순서
//!
//! ```text
//! 1. 사용자가 누른 좋아요
//! 2. 사용자가 쓴 추천 글에 달린 좋아요
//! 3. 사용자가 쓴 추천 글
//! 4. 사용자의 위치
//! 5. 사용자가 포함된 팔로우 관계 (양방향)
//! 6. 사용자
//! 7. 현재 세션
//! ```
//!
//! 트랜잭션 없이 순서대로 삭제하므로, 중간에 실패하면 다시 시도해도
//! 이미 지워진 항목은 건너뜁니다.

use std::any::Any;
use std::sync::Arc;
use actix_web::web;
use once_cell::sync::OnceCell;

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::response::{ProfileCounts, ProfileResponse};
use crate::domain::entities::{NewUserProfile, ProfileChanges, User};
use crate::repositories::Stores;
use crate::utils::string_utils::parse_object_id;

/// 사용자 검색 결과 최대 개수
pub const USER_SEARCH_LIMIT: i64 = 100;

pub struct UserService {
    stores: Stores,
    bcrypt_cost: u32,
}

static USER_SERVICE_INSTANCE: OnceCell<Arc<UserService>> = OnceCell::new();

impl UserService {
    pub fn new(stores: Stores, bcrypt_cost: u32) -> Self {
        Self { stores, bcrypt_cost }
    }

    pub fn instance() -> Arc<Self> {
        USER_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(Stores::registered(), PasswordConfig::bcrypt_cost())))
            .clone()
    }

    /// 새 사용자 등록
    ///
    /// 사용자명/이메일 중복은 사전 조회와 고유 인덱스 양쪽에서
    /// `DuplicateIdentity`로 거부됩니다.
    pub async fn register(&self, profile: NewUserProfile, password: String) -> AppResult<User> {
        self.ensure_identity_available(Some(&profile.username), Some(&profile.email), None)
            .await?;

        let hash_start = std::time::Instant::now();
        let password_hash = self.hash_password(password).await?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = self
            .stores
            .users
            .create(User::new(profile, password_hash))
            .await?;

        log::info!("✅ 새 사용자 등록: {} ({})", user.username, user.id_string());
        Ok(user)
    }

    /// 사용자명과 비밀번호 확인
    ///
    /// 없는 사용자와 틀린 비밀번호 모두 `None`입니다.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.stores.users.find_by_username(username.trim()).await? else {
            log::debug!("로그인 실패: 알 수 없는 사용자 {}", username);
            return Ok(None);
        };

        if self.verify_password(password, &user.password_hash).await? {
            Ok(Some(user))
        } else {
            log::debug!("로그인 실패: 비밀번호 불일치 {}", username);
            Ok(None)
        }
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        let id = parse_object_id(user_id, "User")?;
        self.stores
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 사용자 프로필과 통계, 조회자와의 팔로우 관계
    pub async fn get_profile(&self, viewer: &User, user_id: &str) -> AppResult<ProfileResponse> {
        let user = self.get_user(user_id).await?;

        let counts = ProfileCounts {
            recommendations: self.stores.recommendations.count_by_user(&user.id).await?,
            followers: self.stores.follows.count_followers(&user.id).await?,
            following: self.stores.follows.count_following(&user.id).await?,
            likes: self.stores.likes.count_by_user(&user.id).await?,
        };

        let (is_following, is_followed_by) = if viewer.id == user.id {
            (false, false)
        } else {
            (
                self.stores.follows.exists(&viewer.id, &user.id).await?,
                self.stores.follows.exists(&user.id, &viewer.id).await?,
            )
        };

        Ok(ProfileResponse {
            user: user.into(),
            counts,
            is_following,
            is_followed_by,
        })
    }

    /// 사용자명 부분 일치 검색. 검색어가 비어 있으면 최신 가입순 전체.
    pub async fn search_users(&self, query: Option<&str>) -> AppResult<Vec<User>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        self.stores
            .users
            .search_by_username(query, USER_SEARCH_LIMIT)
            .await
    }

    /// 프로필 수정. 현재 비밀번호를 다시 확인합니다.
    pub async fn update_profile(&self, actor: &User, changes: ProfileChanges, password: &str) -> AppResult<User> {
        if !self.verify_password(password, &actor.password_hash).await? {
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        if changes.is_empty() {
            return Ok(actor.clone());
        }

        let username = changes.username.as_deref().filter(|u| *u != actor.username);
        let email = changes.email.as_deref().filter(|e| *e != actor.email);
        self.ensure_identity_available(username, email, Some(actor)).await?;

        let updated = self
            .stores
            .users
            .update_profile(&actor.id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        log::info!("✏️ 프로필 수정: {}", updated.username);
        Ok(updated)
    }

    /// 회원 탈퇴. 관련 데이터를 모두 지우고 세션을 종료합니다.
    pub async fn delete_account(&self, actor: &User, session_id: Option<&str>) -> AppResult<()> {
        let stores = &self.stores;

        // 글을 먼저 지워야 동시에 들어온 좋아요가 고아 행으로 남지 않습니다.
        let recommendation_ids = stores.recommendations.ids_by_user(&actor.id).await?;
        let recommendations = stores.recommendations.delete_by_user(&actor.id).await?;
        let received_likes = stores
            .likes
            .delete_by_recommendations(&recommendation_ids)
            .await?;
        let own_likes = stores.likes.delete_by_user(&actor.id).await?;

        let locations = stores.locations.delete_by_user(&actor.id).await?;
        let follows = stores.follows.delete_involving(&actor.id).await?;

        stores.users.delete(&actor.id).await?;

        if let Some(session_id) = session_id {
            stores.sessions.delete(session_id).await?;
        }

        log::info!(
            "🗑️ 회원 탈퇴: {} (likes {}+{}, recommendations {}, locations {}, follows {})",
            actor.username, own_likes, received_likes, recommendations, locations, follows
        );
        Ok(())
    }

    async fn ensure_identity_available(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        owner: Option<&User>,
    ) -> AppResult<()> {
        let is_other = |user: &User| owner.is_none_or(|owner| owner.id != user.id);

        if let Some(username) = username {
            if let Some(existing) = self.stores.users.find_by_username(username).await? {
                if is_other(&existing) {
                    return Err(AppError::DuplicateIdentity("Username already exists".to_string()));
                }
            }
        }

        if let Some(email) = email {
            if let Some(existing) = self.stores.users.find_by_email(email).await? {
                if is_other(&existing) {
                    return Err(AppError::DuplicateIdentity("E-mail already exists".to_string()));
                }
            }
        }

        Ok(())
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        web::block(move || bcrypt::hash(password, cost))
            .await
            .context("비밀번호 해싱 작업 실패")?
            .context("비밀번호 해싱 실패")
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        let verified = web::block(move || bcrypt::verify(password, &password_hash))
            .await
            .context("비밀번호 검증 작업 실패")?;

        match verified {
            Ok(is_valid) => Ok(is_valid),
            Err(e) => {
                log::error!("저장된 비밀번호 해시를 읽을 수 없습니다: {}", e);
                Ok(false)
            }
        }
    }
}

fn construct_user_service() -> Box<dyn Any + Send + Sync> {
    Box::new(UserService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "user_service",
        constructor: construct_user_service,
    }
}
