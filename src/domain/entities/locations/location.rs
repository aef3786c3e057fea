//! Location Entity
//!
//! 사용자가 등록한 주소와 좌표 변환 결과입니다.
//! 좌표 (0, 0)은 변환 실패를 뜻하므로 저장 전에 서비스에서 거부합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::geo::ResolvedAddress;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 소유 사용자
    pub user_id: ObjectId,
    /// 표시 이름 (예: "집", "회사")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Geocoding API가 정규화한 주소
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub created_at: DateTime,
}

impl Location {
    pub fn new(user_id: ObjectId, name: Option<String>, resolved: ResolvedAddress) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            name,
            address: resolved.full_address,
            latitude: resolved.latitude,
            longitude: resolved.longitude,
            city: resolved.city,
            state: resolved.state,
            created_at: DateTime::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &ObjectId) -> bool {
        &self.user_id == user_id
    }

    /// 새 변환 결과로 주소 필드를 교체합니다.
    pub fn apply(&mut self, update: &LocationUpdate) {
        if update.name.is_some() {
            self.name = update.name.clone();
        }
        self.address = update.resolved.full_address.clone();
        self.latitude = update.resolved.latitude;
        self.longitude = update.resolved.longitude;
        self.city = update.resolved.city.clone();
        self.state = update.resolved.state.clone();
    }
}

/// 현재 위치 수정 내용
#[derive(Debug, Clone)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub resolved: ResolvedAddress,
}
