//! # Auth Token Service
//!
//! 소셜 로그인 사용자를 위한 JWT 토큰 서비스입니다.
//! 액세스/리프레시 토큰을 발급하고, 리프레시 토큰을 TTL 캐시에 등록하여
//! 순환(rotation)과 폐기(revocation)를 서버 측에서 통제합니다.
//!
//! ## 아키텍처
//!
//! ```text
//! handlers ──▶ services ──▶ caching / repositories
//!    │            │
//!    │            ├── TokenCodec           (HS256 발급/디코딩)
//!    │            ├── RefreshTokenService  (Obtain / Rotate / Revoke)
//!    │            └── UserService          (프로필)
//!    └── middlewares::AuthMiddleware       (Bearer 액세스 토큰)
//! ```
//!
//! 모든 의존성은 `main`에서 조립되어 [`core::AppContext`]로 공유되며,
//! 전역 싱글톤은 사용하지 않습니다.

pub mod caching;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
