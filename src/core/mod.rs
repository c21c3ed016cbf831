//! # Core Module
//!
//! 애플리케이션 전역에서 공유되는 의존성 컨테이너를 제공합니다.

pub mod app_context;

pub use app_context::AppContext;
