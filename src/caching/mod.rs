//! 캐싱 계층 모듈
//!
//! 리프레시 토큰을 TTL과 함께 저장하는 키-값 저장소를 제공합니다.
//!
//! # 구성
//!
//! - [`token_store::TokenStore`] - 저장소 트레이트 (set / get / delete)
//! - [`redis::RedisClient`] - Redis 구현 (운영)
//! - [`memory::InMemoryTokenStore`] - 인메모리 구현 (개발/테스트)
//!
//! # 환경 설정
//!
//! ```bash
//! CACHE_BACKEND=redis               # redis | memory
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod memory;
pub mod redis;
pub mod token_store;

pub use memory::InMemoryTokenStore;
pub use self::redis::RedisClient;
pub use token_store::TokenStore;
