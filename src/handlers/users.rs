use actix_web::{delete, get, patch, web, HttpRequest, HttpResponse};

use crate::core::AppContext;
use crate::domain::dto::users::ProfilePatch;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::handlers::token_handlers::{refresh_token_from_cookie, removal_cookie};

#[get("/me")]
pub async fn get_profile(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = ctx.users.get_profile(user.user_id)?;
    Ok(HttpResponse::Ok().json(profile))
}

#[patch("/me")]
pub async fn update_profile(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    payload: web::Json<ProfilePatch>,
) -> Result<HttpResponse, AppError> {
    let profile = ctx.users.update_profile(user.user_id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 계정 삭제
///
/// 쿠키에 리프레시 토큰이 있으면 함께 폐기합니다. 폐기 실패는 삭제를 막지 않습니다.
#[delete("/me")]
pub async fn delete_profile(
    ctx: web::Data<AppContext>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Ok(token) = refresh_token_from_cookie(&req) {
        if let Err(e) = ctx.refresh_tokens.revoke(&token, user.user_id).await {
            log::warn!("계정 삭제 중 리프레시 토큰 폐기 실패 (무시): user_id={}, error={}", user.user_id, e);
        }
    }

    ctx.users.delete_profile(user.user_id)?;

    Ok(HttpResponse::NoContent()
        .cookie(removal_cookie(&ctx.cookies))
        .finish())
}
