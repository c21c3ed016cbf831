//! 인증 토큰 서비스 모듈
//!
//! JWT 기반 액세스/리프레시 토큰의 발급과 리프레시 토큰 라이프사이클을 담당합니다.
//!
//! # Features
//!
//! - HS256 토큰 발급/검증 ([`TokenCodec`])
//! - 리프레시 토큰 발급, 순환, 폐기 ([`RefreshTokenService`])
//!
//! # Security
//!
//! - 토큰마다 새로운 `jti` (UUID v4)
//! - 폐기 시 소유자 확인이 삭제보다 먼저 수행됨
//! - 캐시 장애 시 요청 실패 (fail closed)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{RefreshTokenService, TokenCodec};
//!
//! let codec = Arc::new(TokenCodec::new(&JwtSettings::from_env()?, Arc::new(SystemClock))?);
//! let tokens = RefreshTokenService::new(codec, store);
//! let session = tokens.obtain(&identity).await?;
//! ```

pub mod refresh_token_service;
pub mod token_codec;

pub use refresh_token_service::*;
pub use token_codec::*;
