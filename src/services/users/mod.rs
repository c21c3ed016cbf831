//! 사용자 프로필 서비스 모듈
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let profile = ctx.users.get_profile(user.user_id)?;
//! ```

pub mod user_service;

pub use user_service::*;
