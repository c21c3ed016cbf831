//! # Data Transfer Objects (DTO) Module
//!
//! HTTP 경계에서 주고받는 요청/응답 객체를 정의합니다.
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | `tokens` | 토큰 발급/갱신/폐기 요청과 응답 |
//! | `users` | 프로필 조회/수정 요청과 응답 |
//!
//! 요청 DTO는 `validator::Validate`로 핸들러 진입 시점에 검증됩니다.

pub mod tokens;
pub mod users;
