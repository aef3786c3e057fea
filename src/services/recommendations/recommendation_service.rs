//! # 추천 서비스
//!
//! 추천 글 작성/조회/삭제, 좋아요, 그리고 위치 기반 노출을 담당합니다.
//!
//! 추천 글은 업체의 도시/주가 조회자의 현재 위치와 같을 때 "근처"로 노출됩니다.
//! 비교는 대소문자를 무시합니다.
//!
//! 좋아요는 (사용자, 추천 글)마다 최대 하나이며, 같은 요청을 반복해도
//! 결과가 같습니다.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use once_cell::sync::OnceCell;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::recommendations::response::{LikeStatusResponse, RecommendationDetail};
use crate::domain::entities::{
    BusinessSnapshot, Location, Recommendation, User, MAX_RATING, MIN_RATING,
};
use crate::domain::models::auth::RequestContext;
use crate::repositories::Stores;
use crate::utils::string_utils::{parse_object_id, validate_required_string};

/// 피드 한 번에 보여주는 추천 글 수
pub const FEED_LIMIT: i64 = 50;

/// 홈 화면 구성
#[derive(Debug, Clone)]
pub enum HomeFeed {
    /// 로그인하지 않은 방문자
    Welcome,
    /// 현재 위치 근처의 추천
    Nearby {
        location: Location,
        recommendations: Vec<Recommendation>,
    },
    /// 위치가 없을 때 최신 추천
    Recent(Vec<Recommendation>),
}

pub struct RecommendationService {
    stores: Stores,
}

static RECOMMENDATION_SERVICE_INSTANCE: OnceCell<Arc<RecommendationService>> = OnceCell::new();

impl RecommendationService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn instance() -> Arc<Self> {
        RECOMMENDATION_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(Stores::registered())))
            .clone()
    }

    /// 추천 글 작성. 평점은 1-5만 허용합니다.
    pub async fn add_recommendation(
        &self,
        author: &User,
        title: &str,
        content: &str,
        business: BusinessSnapshot,
    ) -> AppResult<Recommendation> {
        if !(MIN_RATING..=MAX_RATING).contains(&business.rating) {
            return Err(AppError::ValidationError(format!(
                "Business rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let title = validate_required_string(title, "Title")?;
        let content = validate_required_string(content, "Content")?;
        let business = BusinessSnapshot {
            name: validate_required_string(&business.name, "Business name")?,
            ..business
        };

        let recommendation = self
            .stores
            .recommendations
            .create(Recommendation::new(author.id, title, content, business))
            .await?;

        log::info!("📝 추천 글 작성: {} by {}", recommendation.business_name, author.username);
        Ok(recommendation)
    }

    async fn find(&self, recommendation_id: &str) -> AppResult<Recommendation> {
        let id = parse_object_id(recommendation_id, "Recommendation")?;
        self.stores
            .recommendations
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recommendation not found".to_string()))
    }

    /// 추천 글과 좋아요 수, 조회자의 좋아요 여부
    pub async fn get_recommendation(&self, viewer: &User, recommendation_id: &str) -> AppResult<RecommendationDetail> {
        let recommendation = self.find(recommendation_id).await?;
        let like_count = self
            .stores
            .likes
            .count_by_recommendation(&recommendation.id)
            .await?;
        let liked = self.stores.likes.exists(&viewer.id, &recommendation.id).await?;

        Ok(RecommendationDetail {
            recommendation: recommendation.into(),
            like_count,
            liked,
        })
    }

    /// 작성자만 삭제할 수 있습니다. 달린 좋아요도 함께 지웁니다.
    pub async fn delete_recommendation(&self, actor: &User, recommendation_id: &str) -> AppResult<()> {
        let recommendation = self.find(recommendation_id).await?;

        if !recommendation.is_authored_by(&actor.id) {
            log::warn!(
                "추천 글 삭제 거부: {}는 {}의 작성자가 아닙니다",
                actor.username,
                recommendation.id
            );
            return Err(AppError::Forbidden("Access unauthorized".to_string()));
        }

        // 글을 먼저 지워야 이후의 좋아요 요청이 NotFound로 끝납니다.
        self.stores.recommendations.delete(&recommendation.id).await?;
        self.stores
            .likes
            .delete_by_recommendations(&[recommendation.id])
            .await?;

        log::info!("🗑️ 추천 글 삭제: {}", recommendation.id);
        Ok(())
    }

    /// 좋아요. 이미 눌렀으면 그대로 둡니다.
    pub async fn like(&self, actor: &User, recommendation_id: &str) -> AppResult<LikeStatusResponse> {
        let recommendation = self.find(recommendation_id).await?;

        let inserted = self
            .stores
            .likes
            .insert_if_absent(&actor.id, &recommendation.id)
            .await?;
        if !inserted {
            log::debug!("이미 좋아요한 추천 글: {}", recommendation.id);
        }

        self.like_status(&actor.id, &recommendation.id).await
    }

    /// 좋아요 취소. 누르지 않았으면 아무것도 하지 않습니다.
    pub async fn unlike(&self, actor: &User, recommendation_id: &str) -> AppResult<LikeStatusResponse> {
        let Ok(id) = parse_object_id(recommendation_id, "Recommendation") else {
            // ObjectId가 아닌 값은 좋아요했을 수 없는 추천 글입니다.
            return Ok(LikeStatusResponse {
                recommendation_id: recommendation_id.to_string(),
                liked: false,
                like_count: 0,
            });
        };
        self.stores.likes.remove(&actor.id, &id).await?;
        self.like_status(&actor.id, &id).await
    }

    async fn like_status(&self, user_id: &ObjectId, recommendation_id: &ObjectId) -> AppResult<LikeStatusResponse> {
        Ok(LikeStatusResponse {
            recommendation_id: recommendation_id.to_hex(),
            liked: self.stores.likes.exists(user_id, recommendation_id).await?,
            like_count: self
                .stores
                .likes
                .count_by_recommendation(recommendation_id)
                .await?,
        })
    }

    /// 위치와 같은 도시/주의 추천 글 (최신순)
    pub async fn recommendations_near(&self, location: &Location) -> AppResult<Vec<Recommendation>> {
        self.stores
            .recommendations
            .find_by_city_state(&location.city, &location.state, FEED_LIMIT)
            .await
    }

    pub async fn recent(&self) -> AppResult<Vec<Recommendation>> {
        self.stores.recommendations.find_recent(FEED_LIMIT).await
    }

    /// 사용자가 작성한 추천 글 (최신순)
    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Recommendation>> {
        let user = self.existing_user(user_id).await?;
        self.stores.recommendations.find_by_user(&user.id).await
    }

    /// 사용자가 좋아요한 추천 글 (최근 좋아요 순)
    pub async fn liked_by(&self, user_id: &str) -> AppResult<Vec<Recommendation>> {
        let user = self.existing_user(user_id).await?;
        let ids = self.stores.likes.recommendation_ids_by_user(&user.id).await?;

        let mut by_id: HashMap<_, _> = self
            .stores
            .recommendations
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|recommendation| (recommendation.id, recommendation))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn existing_user(&self, user_id: &str) -> AppResult<User> {
        let id = parse_object_id(user_id, "User")?;
        self.stores
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn home_feed(&self, context: &RequestContext) -> AppResult<HomeFeed> {
        if !context.is_authenticated() {
            return Ok(HomeFeed::Welcome);
        }

        match &context.location {
            Some(location) => Ok(HomeFeed::Nearby {
                location: location.clone(),
                recommendations: self.recommendations_near(location).await?,
            }),
            None => Ok(HomeFeed::Recent(self.recent().await?)),
        }
    }
}

fn construct_recommendation_service() -> Box<dyn Any + Send + Sync> {
    Box::new(RecommendationService::instance())
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "recommendation_service",
        constructor: construct_recommendation_service,
    }
}
