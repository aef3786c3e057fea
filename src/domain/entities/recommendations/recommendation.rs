//! Recommendation Entity
//!
//! 사용자가 작성한 업체 추천 글입니다. 업체 정보는 작성 시점의 스냅샷이며
//! 이후 업체 데이터가 바뀌어도 다시 동기화하지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 허용되는 업체 평점 범위
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 작성자
    pub user_id: ObjectId,
    pub title: String,
    pub content: String,
    pub business_name: String,
    pub business_address: String,
    pub business_city: String,
    pub business_state: String,
    pub business_country: String,
    /// 1-5 정수 평점
    pub business_rating: i32,
    pub created_at: DateTime,
}

/// 추천 작성 시 함께 저장되는 업체 정보
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessSnapshot {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub rating: i32,
}

impl Recommendation {
    pub fn new(user_id: ObjectId, title: String, content: String, business: BusinessSnapshot) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            title,
            content,
            business_name: business.name,
            business_address: business.address,
            business_city: business.city,
            business_state: business.state,
            business_country: business.country,
            business_rating: business.rating,
            created_at: DateTime::now(),
        }
    }

    pub fn is_authored_by(&self, user_id: &ObjectId) -> bool {
        &self.user_id == user_id
    }

    /// 업체 소재지가 주어진 도시/주와 같은지 (대소문자 무시)
    pub fn is_in(&self, city: &str, state: &str) -> bool {
        self.business_city.trim().eq_ignore_ascii_case(city.trim())
            && self.business_state.trim().eq_ignore_ascii_case(state.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_ignores_case() {
        let recommendation = Recommendation::new(
            ObjectId::new(),
            "Best tacos".to_string(),
            "Go on Tuesdays".to_string(),
            BusinessSnapshot {
                name: "Taqueria".to_string(),
                address: "1 Main St".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                country: "US".to_string(),
                rating: 4,
            },
        );

        assert!(recommendation.is_in("austin", "tx"));
        assert!(!recommendation.is_in("Dallas", "TX"));
    }
}
