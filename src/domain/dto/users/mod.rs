//! # User DTO Module
//!
//! 프로필 조회/수정 API의 요청과 응답 객체입니다.
//!
//! ```text
//! PATCH /api/v1/auth/profile/me
//!   body: ProfilePatch  ──▶ UserService::update_profile
//!   resp: ProfileResponse
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
