//! # Routes Module
//!
//! 애플리케이션의 모든 HTTP 라우트를 등록합니다.
//!
//! ```text
//! GET    /health
//! /api/v1/auth
//! ├── POST   /access-token                 (X-Upstream-Auth 게이트웨이 비밀)
//! ├── POST   /access-token/refresh         (refresh_token 쿠키)
//! ├── DELETE /refresh-token/revoke         (Bearer + 쿠키)
//! └── GET|PATCH|DELETE /profile/me         (Bearer)
//! ```
//!
//! actix-web은 먼저 등록된 스코프부터 접두사를 비교하므로, 인증이 필요한
//! 하위 스코프를 `/api/v1/auth` 공개 스코프보다 먼저 등록합니다.

use actix_web::web;
use serde_json::json;

use crate::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }));

    // Health check endpoint
    cfg.service(health_check);

    configure_protected_routes(cfg);
    configure_token_routes(cfg);
}

fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth/refresh-token")
            .wrap(AuthMiddleware::required())
            .service(handlers::token_handlers::revoke_refresh_token),
    );

    cfg.service(
        web::scope("/api/v1/auth/profile")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_profile)
            .service(handlers::users::update_profile)
            .service(handlers::users::delete_profile),
    );
}

fn configure_token_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::token_handlers::obtain_access_token)
            .service(handlers::token_handlers::refresh_access_token),
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "auth_token_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
