//! # 인증 미들웨어
//!
//! 두 가지 모드를 지원합니다.
//!
//! | 모드 | 확인 대상 | 성공 시 |
//! |------|-----------|---------|
//! | [`AuthMode::Bearer`] | `Authorization: Bearer <access>` | [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를 Extensions에 저장 |
//! | [`AuthMode::TrustedUpstream`] | `X-Upstream-Auth: <공유 비밀>` | 그대로 통과 |
//!
//! 실패하면 401 JSON 응답으로 요청을 종료합니다.
//!
//! ```rust,ignore
//! web::scope("/profile")
//!     .wrap(AuthMiddleware::required())
//!     .route("/me", web::get().to(get_profile))
//!
//! #[post("/access-token", wrap = "AuthMiddleware::trusted_upstream()")]
//! ```
//!
//! 검증에 `web::Data<AppContext>`를 사용하므로, 이 미들웨어를 감싼 스코프는
//! `AppContext`가 등록된 앱 안에 있어야 합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 유효한 액세스 토큰 필요
    Bearer,
    /// 소셜 OAuth를 끝낸 로그인 게이트웨이의 공유 비밀 필요
    TrustedUpstream,
}

pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 유효한 액세스 토큰이 반드시 필요한 미들웨어
    pub fn required() -> Self {
        Self::new(AuthMode::Bearer)
    }

    /// 로그인 게이트웨이 호출만 허용하는 미들웨어
    pub fn trusted_upstream() -> Self {
        Self::new(AuthMode::TrustedUpstream)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}
