use serde::Serialize;

use crate::domain::dto::format_timestamp;
use crate::domain::entities::Recommendation;

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub business_name: String,
    pub business_address: String,
    pub business_city: String,
    pub business_state: String,
    pub business_country: String,
    pub business_rating: i32,
    pub created_at: String,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            id: recommendation.id.to_hex(),
            user_id: recommendation.user_id.to_hex(),
            title: recommendation.title.clone(),
            content: recommendation.content.clone(),
            business_name: recommendation.business_name.clone(),
            business_address: recommendation.business_address.clone(),
            business_city: recommendation.business_city.clone(),
            business_state: recommendation.business_state.clone(),
            business_country: recommendation.business_country.clone(),
            business_rating: recommendation.business_rating,
            created_at: format_timestamp(&recommendation.created_at),
        }
    }
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self::from(&recommendation)
    }
}

/// 추천 글 상세 (좋아요 수 포함)
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationDetail {
    #[serde(flatten)]
    pub recommendation: RecommendationResponse,
    pub like_count: u64,
    /// 조회자가 좋아요를 눌렀는지
    pub liked: bool,
}

/// 좋아요/좋아요 취소 결과
#[derive(Debug, Clone, Serialize)]
pub struct LikeStatusResponse {
    pub recommendation_id: String,
    pub liked: bool,
    pub like_count: u64,
}
