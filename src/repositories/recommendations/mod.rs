//! 추천 글 데이터 액세스 계층

pub mod recommendation_repo;
