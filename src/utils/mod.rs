//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티를 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, 토큰 마스킹
//! - [`clock`] - 주입 가능한 시간 공급자

pub mod string_utils;
pub mod clock;
