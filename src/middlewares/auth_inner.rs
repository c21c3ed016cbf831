use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use constant_time_eq::constant_time_eq;
use futures_util::future::LocalBoxFuture;

use crate::config::UPSTREAM_AUTH_HEADER;
use crate::core::AppContext;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenType;
use crate::errors::AppError;
use crate::middlewares::auth_middleware::AuthMode;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let result = match mode {
                AuthMode::Bearer => authenticate(&req).map(|user| {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }),
                AuthMode::TrustedUpstream => verify_upstream(&req),
            };

            if let Err(err) = result {
                log::warn!("인증 실패 ({:?}): {}", mode, err);
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "authentication_required",
                    "message": "유효한 인증 토큰이 필요합니다"
                }));
                let (req, _) = req.into_parts();
                let res = ServiceResponse::new(req, response).map_into_right_body();
                return Ok(res);
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn app_context(req: &ServiceRequest) -> Result<&web::Data<AppContext>, AppError> {
    req.app_data::<web::Data<AppContext>>()
        .ok_or_else(|| AppError::InternalError("AppContext가 등록되지 않았습니다".to_string()))
}

fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let ctx = app_context(req)?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = extract_bearer_token(auth_header)?;

    let claims = ctx
        .codec
        .decode_expecting(token, TokenType::Access)
        .map_err(|e| AppError::AuthenticationError(e.to_string()))?;

    Ok(AuthenticatedUser::from(claims))
}

/// 로그인 게이트웨이의 공유 비밀을 확인합니다.
///
/// 서버에 비밀이 설정되지 않았으면 어떤 요청도 통과시키지 않습니다.
fn verify_upstream(req: &ServiceRequest) -> Result<(), AppError> {
    let ctx = app_context(req)?;

    let expected = ctx.upstream_secret.as_deref().ok_or_else(|| {
        AppError::AuthenticationError("로그인 게이트웨이 비밀이 설정되지 않았습니다".to_string())
    })?;

    let presented = req
        .headers()
        .get(UPSTREAM_AUTH_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError(format!("{} 헤더가 없습니다", UPSTREAM_AUTH_HEADER)))?;

    if !constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
        return Err(AppError::AuthenticationError("게이트웨이 자격 증명이 일치하지 않습니다".to_string()));
    }

    Ok(())
}

/// `Bearer <token>` 형식에서 토큰 부분을 꺼냅니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string()))
}
