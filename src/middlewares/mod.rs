//! HTTP 미들웨어 모듈
//!
//! - [`AuthMiddleware`] - Bearer 액세스 토큰 또는 로그인 게이트웨이 자격 증명 검증

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::{AuthMiddleware, AuthMode};
