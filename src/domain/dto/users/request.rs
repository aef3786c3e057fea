//! 사용자 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{NewUserProfile, ProfileChanges};
use crate::utils::string_utils::deserialize_optional_string;

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name is required"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 30, message = "Username must be 1-30 characters"))]
    pub username: String,

    #[validate(email(message = "Please enter a valid e-mail address"))]
    pub email: String,

    #[validate(length(min = 8, max = 30, message = "Password must be 8-30 characters"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 250, message = "Bio must be at most 250 characters"))]
    pub bio: Option<String>,
}

impl RegisterRequest {
    /// 앞뒤 공백을 정리한 프로필 필드와 평문 비밀번호로 분리합니다.
    pub fn into_parts(self) -> (NewUserProfile, String) {
        let profile = NewUserProfile {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            image_url: self.image_url,
            bio: self.bio,
        };
        (profile, self.password)
    }
}

/// 로그인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// 프로필 수정 요청. 변경하려면 현재 비밀번호가 필요합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Password is required to edit your profile"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 30, message = "Username must be 1-30 characters"))]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "Please enter a valid e-mail address"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 50))]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 50))]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 250, message = "Bio must be at most 250 characters"))]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Header image URL must be a valid URL"))]
    pub header_image_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_parts(self) -> (ProfileChanges, String) {
        let changes = ProfileChanges {
            username: self.username,
            email: self.email.map(|email| email.to_lowercase()),
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            image_url: self.image_url,
            header_image_url: self.header_image_url,
        };
        (changes, self.password)
    }
}

/// 사용자 검색 쿼리 (`?q=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub q: Option<String>,
}
