//! # Routes
//!
//! 모든 API는 `/api/v1` 아래에 있습니다. 홈 피드만 익명 접근을 허용하고,
//! 회원 가입/로그인을 제외한 나머지는 로그인이 필요합니다.

use crate::handlers;
use crate::middlewares::SessionMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Home feed (익명 허용)
    cfg.service(
        web::resource("/api/v1")
            .wrap(SessionMiddleware::optional())
            .route(web::get().to(handlers::home::home)),
    );

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_location_routes(cfg);
    configure_recommendation_routes(cfg);
    configure_search_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::logout),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(SessionMiddleware::required())
            .service(handlers::users::search_users)
            .service(handlers::users::update_profile)
            .service(handlers::users::delete_account)
            .service(handlers::users::get_profile)
            .service(handlers::users::list_followers)
            .service(handlers::users::list_following)
            .service(handlers::users::list_likes)
            .service(handlers::users::list_recommendations)
            .service(handlers::users::follow)
            .service(handlers::users::unfollow),
    );
}

fn configure_location_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/locations")
            .wrap(SessionMiddleware::required())
            .service(handlers::locations::current_location)
            .service(handlers::locations::add_location)
            .service(handlers::locations::update_current_location)
            .service(handlers::locations::list_locations)
            .service(handlers::locations::select_location),
    );
}

fn configure_recommendation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/recommendations")
            .wrap(SessionMiddleware::required())
            .service(handlers::recommendations::list_visible)
            .service(handlers::recommendations::create_recommendation)
            .service(handlers::recommendations::get_recommendation)
            .service(handlers::recommendations::delete_recommendation)
            .service(handlers::recommendations::like)
            .service(handlers::recommendations::unlike),
    );
}

fn configure_search_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/search")
            .wrap(SessionMiddleware::required())
            .service(handlers::search::search_businesses),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "datemeet_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "sessions": "Redis",
            "geocoding": "Google Geocoding API",
            "business_search": "Yelp Fusion API"
        }
    }))
}
