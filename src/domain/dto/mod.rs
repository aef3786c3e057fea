//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 구조체입니다. 요청 DTO는 `validator`로 형식을 검증하고,
//! 응답 DTO는 엔티티의 `ObjectId`/`DateTime`을 문자열로 바꿔 내보냅니다.
//!
//! ```text
//! dto/
//! ├── users/            ← 회원가입, 로그인, 프로필
//! ├── locations/        ← 현재 위치
//! ├── recommendations/  ← 추천 글, 좋아요
//! └── search/           ← 비즈니스 검색
//! ```

pub mod users;
pub mod locations;
pub mod recommendations;
pub mod search;

use mongodb::bson::DateTime;

/// 응답에 쓰는 RFC 3339 타임스탬프
pub(crate) fn format_timestamp(value: &DateTime) -> String {
    value
        .try_to_rfc3339_string()
        .unwrap_or_else(|_| value.timestamp_millis().to_string())
}
