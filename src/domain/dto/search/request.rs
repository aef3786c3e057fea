//! 비즈니스 검색 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 현재 위치 주변에서 관심사로 업체를 찾습니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BusinessSearchRequest {
    /// 검색어 (예: "tacos", "karaoke")
    #[validate(length(min = 1, max = 100, message = "Please enter an interest"))]
    pub interest: String,
}
