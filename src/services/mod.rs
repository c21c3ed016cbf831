//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 [`AppContext`](crate::core::AppContext)를 통해
//! 핸들러와 미들웨어에 공유됩니다.
//!
//! - `auth` - 토큰 코덱과 리프레시 토큰 라이프사이클
//! - `users` - 프로필 조회/수정/삭제

pub mod auth;
pub mod users;
