//! 리프레시 토큰 저장소 추상화
//!
//! 라이프사이클 매니저는 이 트레이트만 알고 있으며, 운영 환경에서는
//! [`RedisClient`](super::redis::RedisClient), 개발/테스트 환경에서는
//! [`InMemoryTokenStore`](super::memory::InMemoryTokenStore)가 주입됩니다.

use async_trait::async_trait;

use crate::errors::TokenError;

/// TTL을 지원하는 문자열 키-값 저장소
///
/// 모든 연산은 저장소에 연결할 수 없을 때 [`TokenError::CacheUnavailable`]을 반환합니다.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// 키에 값을 저장하고 `ttl_seconds` 뒤 만료되도록 합니다. 기존 값과 TTL은 덮어씁니다.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), TokenError>;

    /// 만료되지 않은 값을 조회합니다.
    async fn get(&self, key: &str) -> Result<Option<String>, TokenError>;

    /// 키를 삭제하고 실제로 삭제된 개수(0 또는 1)를 반환합니다.
    async fn delete(&self, key: &str) -> Result<u64, TokenError>;
}
