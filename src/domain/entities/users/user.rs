//! User Entity Implementation
//!
//! 서비스 사용자 엔티티입니다. 사용자명과 이메일은 전체 사용자 사이에서 유일하며,
//! 비밀번호는 bcrypt 해시로만 저장합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 프로필 이미지가 없을 때 사용하는 기본 이미지 경로
pub const DEFAULT_PROFILE_IMAGE: &str = "/static/images/blank-profile-picture";

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 사용자 이름 (unique)
    pub username: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 신규 사용자 생성에 필요한 프로필 필드
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

/// 프로필 수정 시 변경할 필드 (None은 변경하지 않음)
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub header_image_url: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.image_url.is_none()
            && self.header_image_url.is_none()
    }
}

impl User {
    /// 해시된 비밀번호로 새 사용자를 만듭니다.
    pub fn new(profile: NewUserProfile, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: ObjectId::new(),
            username: profile.username,
            email: profile.email,
            password_hash,
            first_name: profile.first_name,
            last_name: profile.last_name,
            bio: profile.bio,
            image_url: profile
                .image_url
                .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
            header_image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> String {
        self.id.to_hex()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 변경 사항을 메모리상의 엔티티에 적용합니다.
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(username) = &changes.username {
            self.username = username.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(bio) = &changes.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(image_url) = &changes.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(header_image_url) = &changes.header_image_url {
            self.header_image_url = Some(header_image_url.clone());
        }
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> NewUserProfile {
        NewUserProfile {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            image_url: None,
            bio: None,
        }
    }

    #[test]
    fn test_new_user_uses_default_image() {
        let user = User::new(profile(), "hash".to_string());
        assert_eq!(user.image_url, DEFAULT_PROFILE_IMAGE);
        assert_eq!(user.full_name(), "Alice Liddell");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_apply_only_changes_given_fields() {
        let mut user = User::new(profile(), "hash".to_string());
        let changes = ProfileChanges {
            bio: Some("Taco enthusiast".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        user.apply(&changes);
        assert_eq!(user.bio.as_deref(), Some("Taco enthusiast"));
        assert_eq!(user.username, "alice");
        assert!(ProfileChanges::default().is_empty());
    }
}
