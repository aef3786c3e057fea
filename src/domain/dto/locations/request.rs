//! 위치 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 위치 등록/수정 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationRequest {
    /// 저장 이름 (선택)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 300, message = "Please enter an address"))]
    pub address: String,
}
