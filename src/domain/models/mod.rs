//! # Domain Models Module
//!
//! 토큰 클레임, 인증된 사용자, 신원 확인 결과 같은 값 객체를 정의합니다.
//!
//! - [`token`] - JWT 클레임, 토큰 용도, 토큰 쌍
//! - [`auth`] - 요청 단위 인증 사용자, 소셜 로그인/신원 정보

pub mod token;
pub mod auth;

pub use token::*;
pub use auth::*;
