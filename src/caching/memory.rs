//! 인메모리 토큰 저장소
//!
//! `CACHE_BACKEND=memory`일 때와 테스트에서 사용됩니다.
//! 만료는 조회 시점에 주입된 [`Clock`] 기준으로 판단합니다.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::caching::token_store::TokenStore;
use crate::errors::TokenError;
use crate::utils::clock::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// 프로세스 로컬 TTL 저장소
pub struct InMemoryTokenStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTokenStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// 만료되지 않은 키 목록 (정렬됨)
    pub fn keys(&self) -> Result<Vec<String>, TokenError> {
        let now = self.clock.now();
        let entries = self.entries.read().map_err(|_| poisoned())?;

        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

fn poisoned() -> TokenError {
    TokenError::CacheUnavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), TokenError> {
        let now = self.clock.now();
        let expires_at = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, TokenError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<u64, TokenError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        match entries.remove(key) {
            Some(entry) if entry.expires_at > now => Ok(1),
            _ => Ok(0),
        }
    }
}
