//! # Home Feed HTTP Handler
//!
//! 익명 방문자에게는 환영 메시지, 로그인 사용자에게는 현재 위치 근처의 추천
//! (위치가 없으면 최신 추천)을 돌려줍니다.

use actix_web::HttpResponse;
use serde_json::{json, Value};

use crate::core::errors::AppError;
use crate::domain::dto::locations::response::LocationResponse;
use crate::domain::dto::recommendations::response::RecommendationResponse;
use crate::domain::entities::Recommendation;
use crate::domain::models::auth::RequestContext;
use crate::services::recommendations::{HomeFeed, RecommendationService};

fn responses(recommendations: &[Recommendation]) -> Vec<RecommendationResponse> {
    recommendations.iter().map(RecommendationResponse::from).collect()
}

pub fn feed_body(feed: &HomeFeed) -> Value {
    match feed {
        HomeFeed::Welcome => json!({
            "feed": "welcome",
            "message": "Welcome to dateMeet! Sign up or log in to find date ideas near you."
        }),
        HomeFeed::Nearby { location, recommendations } => json!({
            "feed": "nearby",
            "location": LocationResponse::from(location),
            "recommendations": responses(recommendations)
        }),
        HomeFeed::Recent(recommendations) => json!({
            "feed": "recent",
            "message": "Add a location to see recommendations near you.",
            "recommendations": responses(recommendations)
        }),
    }
}

/// `GET /api/v1`
pub async fn home(
    context: RequestContext,
) -> Result<HttpResponse, AppError> {
    let feed = RecommendationService::instance().home_feed(&context).await?;
    Ok(HttpResponse::Ok().json(feed_body(&feed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_body() {
        let body = feed_body(&HomeFeed::Welcome);
        assert_eq!(body["feed"], "welcome");
        assert!(body.get("recommendations").is_none());
    }

    #[test]
    fn test_recent_body_lists_recommendations() {
        let body = feed_body(&HomeFeed::Recent(Vec::new()));
        assert_eq!(body["feed"], "recent");
        assert_eq!(body["recommendations"], json!([]));
    }
}
