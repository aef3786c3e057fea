//! 사용자 관련 응답 DTO

use serde::Serialize;

use crate::domain::dto::format_timestamp;
use crate::domain::entities::User;

/// 공개 사용자 정보 (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image_url: Option<String>,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            bio: user.bio.clone(),
            image_url: user.image_url.clone(),
            header_image_url: user.header_image_url.clone(),
            created_at: format_timestamp(&user.created_at),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// 프로필 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProfileCounts {
    pub recommendations: u64,
    pub followers: u64,
    pub following: u64,
    pub likes: u64,
}

/// 프로필 조회 응답
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub counts: ProfileCounts,
    /// 조회자가 이 사용자를 팔로우 중인지
    pub is_following: bool,
    /// 이 사용자가 조회자를 팔로우 중인지
    pub is_followed_by: bool,
}

/// 로그인/회원가입 응답
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub message: String,
}

impl LoginResponse {
    pub fn new(user: &User, access_token: String, expires_in: i64, message: String) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            message,
        }
    }
}
