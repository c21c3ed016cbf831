//! 토큰 발급/갱신/폐기 핸들러
//!
//! 리프레시 토큰은 응답 본문에 싣지 않고 `refresh_token` HttpOnly 쿠키로만 주고받습니다.
//! 로그인은 소셜 OAuth를 끝낸 게이트웨이가 `X-Upstream-Auth` 헤더와 함께 호출합니다.
//!
//! | 메서드 | 경로 | 인증 |
//! |--------|------|------|
//! | POST | `/api/v1/auth/access-token` | 게이트웨이 비밀 |
//! | POST | `/api/v1/auth/access-token/refresh` | 쿠키 |
//! | DELETE | `/api/v1/auth/refresh-token/revoke` | Bearer + 쿠키 |

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{delete, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::{CookieSettings, REFRESH_TOKEN_COOKIE};
use crate::core::AppContext;
use crate::domain::dto::tokens::{
    MessageResponse, ObtainTokenResponse, RefreshTokenResponse, SocialLoginRequest, UserInfo,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;

/// 리프레시 토큰 쿠키
pub fn refresh_cookie(token: String, ttl_seconds: u64, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .max_age(CookieDuration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX)))
        .finish()
}

/// 브라우저의 리프레시 토큰 쿠키를 지우는 쿠키
pub fn removal_cookie(settings: &CookieSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(settings.same_site)
        .finish();
    cookie.make_removal();
    cookie
}

/// 요청 쿠키에서 리프레시 토큰을 꺼냅니다.
pub fn refresh_token_from_cookie(req: &HttpRequest) -> Result<String, AppError> {
    req.cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::BadRequest("Refresh token not found in cookies.".to_string()))
}

#[post("/access-token", wrap = "AuthMiddleware::trusted_upstream()")]
pub async fn obtain_access_token(
    ctx: web::Data<AppContext>,
    payload: web::Json<SocialLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let login = payload.into_inner().into_social_login()?;
    let identity = ctx.identity.resolve(&login).await?;
    let session = ctx.refresh_tokens.obtain(&identity).await?;

    log::info!("로그인 성공: user_id={}, provider={}", identity.user_id, login.provider.as_str());

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            session.refresh_token,
            session.refresh_ttl_seconds,
            &ctx.cookies,
        ))
        .json(ObtainTokenResponse {
            access: session.access_token,
            user_info: UserInfo {
                uid: identity.uid,
                email: identity.email,
            },
            message: "Login successful".to_string(),
        }))
}

#[post("/access-token/refresh")]
pub async fn refresh_access_token(
    ctx: web::Data<AppContext>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let old_token = refresh_token_from_cookie(&req)?;
    let session = ctx.refresh_tokens.refresh(&old_token).await?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(
            session.refresh_token,
            session.refresh_ttl_seconds,
            &ctx.cookies,
        ))
        .json(RefreshTokenResponse {
            access: session.access_token,
        }))
}

#[delete("/revoke")]
pub async fn revoke_refresh_token(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token = refresh_token_from_cookie(&req)?;
    ctx.refresh_tokens.revoke(&token, user.user_id).await?;

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(&ctx.cookies))
        .json(MessageResponse::new("Refresh token revoked.")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::SameSite;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::Duration;

    use super::*;
    use crate::caching::InMemoryTokenStore;
    use crate::config::{JwtSettings, SocialProvider, UPSTREAM_AUTH_HEADER};
    use crate::domain::models::auth::SocialLogin;
    use crate::repositories::users::UserRepository;
    use crate::routes::configure_all_routes;
    use crate::utils::clock::SystemClock;

    fn context() -> AppContext {
        let clock = Arc::new(SystemClock);
        AppContext::new(
            &JwtSettings::new("handler-secret", Duration::minutes(5), Duration::days(1)),
            Arc::new(InMemoryTokenStore::new(clock.clone())),
            Arc::new(UserRepository::default()),
            CookieSettings::default(),
            clock,
        )
        .unwrap()
        .with_upstream_secret(GATEWAY_SECRET)
    }

    const GATEWAY_SECRET: &str = "gateway-secret";

    fn login_body() -> serde_json::Value {
        serde_json::json!({ "provider": "kakao", "uid": "k-42", "email": "me@kakao.com" })
    }

    fn gateway_login(body: serde_json::Value) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/auth/access-token")
            .insert_header((UPSTREAM_AUTH_HEADER, GATEWAY_SECRET))
            .set_json(body)
    }

    #[actix_web::test]
    async fn test_refresh_cookie_attributes() {
        let cookie = refresh_cookie("abc".to_string(), 86_400, &CookieSettings::default());

        assert_eq!(cookie.name(), "refresh_token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(86_400)));
    }

    #[actix_web::test]
    async fn test_obtain_refresh_revoke_flow() {
        let ctx = web::Data::new(context());
        let app = test::init_service(
            App::new().app_data(ctx.clone()).configure(configure_all_routes),
        )
        .await;

        // 발급
        let req = gateway_login(login_body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let first_refresh = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .unwrap();
        let body: ObtainTokenResponse = test::read_body_json(resp).await;
        assert_eq!(body.user_info.uid.as_deref(), Some("k-42"));
        assert_eq!(body.user_info.email.as_deref(), Some("me@kakao.com"));
        assert!(!body.access.is_empty());

        // 갱신
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/access-token/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, first_refresh.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let second_refresh = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .unwrap();
        let body: RefreshTokenResponse = test::read_body_json(resp).await;
        assert_ne!(first_refresh, second_refresh);

        // 순환된 토큰 재사용
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/access-token/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, first_refresh))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 폐기
        let revoke = || {
            test::TestRequest::delete()
                .uri("/api/v1/auth/refresh-token/revoke")
                .insert_header(("Authorization", format!("Bearer {}", body.access)))
                .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, second_refresh.clone()))
                .to_request()
        };
        let resp = test::call_service(&app, revoke()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, revoke()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_refresh_without_cookie_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context()))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/access-token/refresh")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Refresh token not found in cookies.");
    }

    #[actix_web::test]
    async fn test_revoke_requires_bearer_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context()))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/v1/auth/refresh-token/revoke")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, "whatever"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_revoke_other_users_token_is_bad_request() {
        let ctx = web::Data::new(context());
        let app = test::init_service(
            App::new().app_data(ctx.clone()).configure(configure_all_routes),
        )
        .await;

        let victim = ctx
            .refresh_tokens
            .obtain(&crate::domain::models::auth::UserIdentity::new(1))
            .await
            .unwrap();
        let attacker = ctx
            .refresh_tokens
            .obtain(&crate::domain::models::auth::UserIdentity::new(2))
            .await
            .unwrap();

        let req = test::TestRequest::delete()
            .uri("/api/v1/auth/refresh-token/revoke")
            .insert_header(("Authorization", format!("Bearer {}", attacker.access_token)))
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, victim.refresh_token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(ctx.refresh_tokens.is_active(&victim.refresh_token).await.unwrap());
    }

    #[actix_web::test]
    async fn test_obtain_rejects_invalid_payload() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context()))
                .configure(configure_all_routes),
        )
        .await;

        let req = gateway_login(serde_json::json!({ "provider": "myspace", "uid": "1" })).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_obtain_without_gateway_credential_is_unauthorized() {
        let ctx = web::Data::new(context());
        let app = test::init_service(
            App::new().app_data(ctx.clone()).configure(configure_all_routes),
        )
        .await;

        let req = gateway_login(login_body()).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // 자격 증명 없이 같은 소셜 계정으로 세션을 요청
        let hijack = serde_json::json!({ "provider": "kakao", "uid": "k-42", "email": "attacker@kakao.com" });
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/access-token")
            .set_json(hijack.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.response().cookies().all(|c| c.name() != REFRESH_TOKEN_COOKIE));

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/access-token")
            .insert_header((UPSTREAM_AUTH_HEADER, "guessed-secret"))
            .set_json(hijack)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let stored = ctx
            .identity
            .resolve(&SocialLogin {
                provider: SocialProvider::Kakao,
                uid: "k-42".to_string(),
                email: None,
                name: None,
            })
            .await
            .unwrap();
        assert_eq!(stored.user_id, 1);
        assert_eq!(stored.email.as_deref(), Some("me@kakao.com"));
    }

    #[actix_web::test]
    async fn test_repeat_login_keeps_registered_email() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context()))
                .configure(configure_all_routes),
        )
        .await;

        let first: ObtainTokenResponse =
            test::call_and_read_body_json(&app, gateway_login(login_body()).to_request()).await;

        let changed = serde_json::json!({ "provider": "kakao", "uid": "k-42", "email": "other@kakao.com" });
        let second: ObtainTokenResponse =
            test::call_and_read_body_json(&app, gateway_login(changed).to_request()).await;

        assert_eq!(first.user_info.email.as_deref(), Some("me@kakao.com"));
        assert_eq!(second.user_info.email.as_deref(), Some("me@kakao.com"));
    }
}
