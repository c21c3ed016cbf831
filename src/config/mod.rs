//! # Configuration Module
//!
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 토큰 캐시 저장소 설정
//! - [`auth_config`] - JWT, 리프레시 토큰 쿠키, 소셜 프로바이더 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 환경 설정
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # JWT 설정 (프로덕션 필수)
//! export JWT_SECRET="your-super-secret-key"
//!
//! # 토큰 캐시
//! export CACHE_BACKEND="redis"     # redis | memory
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
