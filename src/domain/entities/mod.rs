//! # Domain Entities Module
//!
//! 사용자 디렉터리에 저장되는 핵심 도메인 객체입니다.

pub mod users;

pub use users::*;
