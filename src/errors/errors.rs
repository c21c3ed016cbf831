//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! HTTP 계층까지 전달되는 통합 에러 타입입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 핸들러가
//! `{"error": "..."}` 형태의 일관된 JSON 응답을 반환하도록 합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn revoke(ctx: web::Data<AppContext>, user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     // TokenError는 `?`로 AppError로 변환됩니다 (클라이언트 책임이면 400, 아니면 500)
//!     ctx.refresh_tokens.revoke(&token, user.user_id).await?;
//!     Ok(HttpResponse::Ok().finish())
//! }
//! ```

use thiserror::Error;

use crate::errors::token_error::TokenError;

/// 애플리케이션 전역 에러 타입
///
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 잘못된 요청 (400 Bad Request)
    ///
    /// 누락되었거나 유효하지 않은 토큰, 이미 무효화된 토큰 등
    #[error("{0}")]
    BadRequest(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 토큰 캐시 관련 에러 (500 Internal Server Error)
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::CacheError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 서버 책임 에러는 내부 정보를 노출하지 않도록 고정된 메시지를 사용합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            log::error!("요청 처리 중 서버 오류: {}", self);
            "An internal error occurred.".to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": message
            }))
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        if err.is_client_fault() {
            return AppError::BadRequest(err.to_string());
        }

        match err {
            TokenError::CacheUnavailable(msg) => AppError::CacheError(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
