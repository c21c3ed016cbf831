//! # Domain Layer Module
//!
//! 인증 토큰 서비스의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 사용자와 프로필
//! ├── DTOs      - HTTP 요청/응답 계약
//! └── Models    - 토큰 클레임, 인증된 사용자, 신원 정보
//!      │
//!      ▼
//! Services (TokenCodec, RefreshTokenService, UserService)
//! ```

pub mod entities;
pub mod dto;
pub mod models;
