//! 추천 글 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::BusinessSnapshot;

/// 추천 글 작성 요청
///
/// 평점 범위(1-5)는 서비스에서도 다시 확인합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecommendationRequest {
    #[validate(length(min = 1, max = 250, message = "Title must be 1-250 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 500, message = "Content must be 1-500 characters"))]
    pub content: String,

    #[validate(length(min = 1, message = "Business name is required"))]
    pub business_name: String,

    #[serde(default)]
    pub business_address: String,

    #[validate(length(min = 1, message = "Business city is required"))]
    pub business_city: String,

    #[validate(length(min = 1, message = "Business state is required"))]
    pub business_state: String,

    #[serde(default)]
    pub business_country: String,

    pub business_rating: i32,
}

impl CreateRecommendationRequest {
    pub fn into_parts(self) -> (String, String, BusinessSnapshot) {
        let business = BusinessSnapshot {
            name: self.business_name.trim().to_string(),
            address: self.business_address.trim().to_string(),
            city: self.business_city.trim().to_string(),
            state: self.business_state.trim().to_string(),
            country: self.business_country.trim().to_string(),
            rating: self.business_rating,
        };
        (self.title.trim().to_string(), self.content.trim().to_string(), business)
    }
}
