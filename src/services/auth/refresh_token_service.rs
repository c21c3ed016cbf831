//! 리프레시 토큰 라이프사이클 서비스
//!
//! 리프레시 토큰의 발급(Obtain), 순환(Rotate), 폐기(Revoke)를 담당합니다.
//! 캐시 키를 만들고 항목을 삭제하는 것은 이 서비스뿐입니다.
//!
//! # 상태 전이
//!
//! ```text
//! Issued ──set──▶ Active ──┬── rotate ──▶ Rotated (키 삭제, 새 jti 등록)
//!                          ├── revoke ──▶ Revoked (키 삭제)
//!                          └── TTL    ──▶ Expired
//! ```
//!
//! # 캐시 키
//!
//! `refresh_token:{user_id}:{jti}` → 원본 리프레시 토큰

use std::sync::Arc;

use crate::caching::TokenStore;
use crate::domain::models::auth::UserIdentity;
use crate::domain::models::token::{TokenClaims, TokenType};
use crate::errors::TokenError;
use crate::services::auth::token_codec::TokenCodec;
use crate::utils::string_utils::token_preview;

/// 리프레시 토큰 캐시 키
pub fn refresh_token_key(user_id: i64, jti: &str) -> String {
    format!("refresh_token:{}:{}", user_id, jti)
}

/// Obtain 결과
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub cache_key: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
    /// 리프레시 토큰 쿠키 Max-Age (초)
    pub refresh_ttl_seconds: u64,
}

/// 리프레시 엔드포인트 결과
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub cache_key: String,
    pub refresh_ttl_seconds: u64,
}

fn require_jti(claims: &TokenClaims) -> Result<&str, TokenError> {
    if claims.jti.trim().is_empty() {
        return Err(TokenError::ClaimMissing("jti"));
    }
    Ok(&claims.jti)
}

/// 리프레시 토큰 라이프사이클 관리자
#[derive(Clone)]
pub struct RefreshTokenService {
    codec: Arc<TokenCodec>,
    store: Arc<dyn TokenStore>,
}

impl RefreshTokenService {
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn TokenStore>) -> Self {
        Self { codec, store }
    }

    /// 토큰 쌍을 발급하고 리프레시 토큰을 캐시에 등록합니다.
    ///
    /// # Errors
    ///
    /// * `ClaimMissing("jti")` - 발급된 리프레시 토큰에 `jti`가 없는 경우
    /// * `Signing` / `CacheUnavailable` - 서버 측 실패
    pub async fn obtain(&self, identity: &UserIdentity) -> Result<IssuedSession, TokenError> {
        let pair = self.codec.issue_pair(identity.user_id, &identity.custom_claims())?;

        let claims = self.codec.decode(&pair.refresh_token, false)?;
        let cache_key = refresh_token_key(claims.user_id, require_jti(&claims)?);
        let ttl = self.codec.refresh_ttl_seconds();

        self.store.set(&cache_key, &pair.refresh_token, ttl).await?;

        log::info!("리프레시 토큰 발급: user_id={}, key={}", identity.user_id, cache_key);

        Ok(IssuedSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            cache_key,
            expires_in: pair.expires_in,
            refresh_ttl_seconds: ttl,
        })
    }

    /// 이전 리프레시 토큰의 캐시 항목을 새 토큰으로 교체합니다.
    ///
    /// 이전 토큰은 서명 검증 없이 디코딩합니다. 호출자(리프레시 엔드포인트)가
    /// 이미 검증을 마쳤다는 전제입니다. 이전 항목이 이미 없는 경우는 그대로 진행하지만,
    /// 캐시 오류로 삭제 여부를 알 수 없으면 새 항목을 등록하지 않고 실패합니다.
    ///
    /// # Returns
    ///
    /// 새 리프레시 토큰의 캐시 키
    ///
    /// # Errors
    ///
    /// * `TokenProcessing` - 새 토큰을 검증/디코딩할 수 없는 경우
    /// * `CacheUnavailable` - 이전 항목 삭제 또는 새 항목 저장 실패
    pub async fn rotate(&self, old_token: &str, new_token: &str) -> Result<String, TokenError> {
        match self.codec.decode(old_token, false) {
            Ok(old) => {
                let old_key = refresh_token_key(old.user_id, &old.jti);
                match self.store.delete(&old_key).await {
                    Ok(0) => log::info!("이전 리프레시 토큰이 이미 없습니다: key={}", old_key),
                    Ok(_) => log::debug!("이전 리프레시 토큰 삭제: key={}", old_key),
                    Err(e) => {
                        log::error!("이전 리프레시 토큰 삭제 실패, 순환 중단: key={}, error={}", old_key, e);
                        return Err(e);
                    }
                }
            }
            Err(e) => log::warn!(
                "이전 리프레시 토큰 디코딩 실패 (계속 진행): token={}..., error={}",
                token_preview(old_token),
                e
            ),
        }

        let new_claims = self
            .codec
            .decode(new_token, true)
            .map_err(|e| TokenError::TokenProcessing(format!("new refresh token: {}", e)))?;
        let jti = require_jti(&new_claims)
            .map_err(|e| TokenError::TokenProcessing(e.to_string()))?;

        let new_key = refresh_token_key(new_claims.user_id, jti);
        self.store
            .set(&new_key, new_token, self.codec.refresh_ttl_seconds())
            .await?;

        log::info!("리프레시 토큰 순환 완료: user_id={}, key={}", new_claims.user_id, new_key);

        Ok(new_key)
    }

    /// 리프레시 토큰을 폐기합니다.
    ///
    /// 소유자 확인은 삭제보다 먼저 수행되므로 다른 사용자의 토큰 항목은 건드리지 않습니다.
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - 만료/위조/형식 오류 토큰
    /// * `OwnershipMismatch` - 토큰의 `user_id`가 요청자와 다른 경우
    /// * `NotFound` - 이미 폐기되었거나 순환/만료된 토큰
    pub async fn revoke(&self, token: &str, requesting_user_id: i64) -> Result<(), TokenError> {
        let claims = self.codec.decode(token, true)?;
        let jti = require_jti(&claims)?;

        if claims.user_id != requesting_user_id {
            log::warn!(
                "리프레시 토큰 소유자 불일치: token_user_id={}, requesting_user_id={}",
                claims.user_id,
                requesting_user_id
            );
            return Err(TokenError::OwnershipMismatch {
                token_user_id: claims.user_id,
                requesting_user_id,
            });
        }

        let key = refresh_token_key(claims.user_id, jti);
        if self.store.delete(&key).await? == 0 {
            log::info!("폐기할 리프레시 토큰이 없습니다: key={}", key);
            return Err(TokenError::NotFound);
        }

        log::info!("리프레시 토큰 폐기: user_id={}, key={}", claims.user_id, key);
        Ok(())
    }

    /// 토큰이 검증되고 캐시에 같은 값으로 등록되어 있는지 확인합니다.
    pub async fn is_active(&self, token: &str) -> Result<bool, TokenError> {
        let claims = match self.codec.decode(token, true) {
            Ok(claims) => claims,
            Err(TokenError::InvalidToken(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        let key = refresh_token_key(claims.user_id, &claims.jti);
        let stored = self.store.get(&key).await?;

        Ok(stored.as_deref() == Some(token))
    }

    /// 리프레시 엔드포인트 흐름: 검증 → 활성 확인 → 새 쌍 발급 → 순환
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - 만료/위조/형식 오류이거나 액세스 토큰이 전달된 경우
    /// * `NotFound` - 폐기되었거나 이미 순환된 토큰
    pub async fn refresh(&self, old_token: &str) -> Result<RefreshedSession, TokenError> {
        let claims = self.codec.decode_expecting(old_token, TokenType::Refresh)?;

        if !self.is_active(old_token).await? {
            log::info!(
                "비활성 리프레시 토큰으로 갱신 시도: user_id={}, token={}...",
                claims.user_id,
                token_preview(old_token)
            );
            return Err(TokenError::NotFound);
        }

        let pair = self.codec.issue_pair(claims.user_id, &claims.custom_claims())?;
        let cache_key = self.rotate(old_token, &pair.refresh_token).await?;

        Ok(RefreshedSession {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            cache_key,
            refresh_ttl_seconds: self.codec.refresh_ttl_seconds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::InMemoryTokenStore;
    use crate::config::JwtSettings;
    use crate::domain::models::token::CustomClaims;
    use crate::errors::InvalidTokenKind;
    use crate::utils::clock::ManualClock;
    use chrono::{Duration, Utc};

    struct Fixture {
        service: RefreshTokenService,
        codec: Arc<TokenCodec>,
        store: Arc<InMemoryTokenStore>,
        clock: Arc<ManualClock>,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let settings = JwtSettings::new("test-secret", Duration::minutes(5), Duration::days(1));
        let codec = Arc::new(TokenCodec::new(&settings, clock.clone()).unwrap());
        let store = Arc::new(InMemoryTokenStore::new(clock.clone()));
        let service = RefreshTokenService::new(codec.clone(), store.clone());

        Fixture { service, codec, store, clock }
    }

    fn identity(user_id: i64) -> UserIdentity {
        UserIdentity::new(user_id)
            .with_email("user@example.com")
            .with_uid("kakao-1")
    }

    #[test]
    fn test_refresh_token_key_format() {
        assert_eq!(refresh_token_key(42, "abc"), "refresh_token:42:abc");
    }

    #[test]
    fn test_require_jti() {
        let mut claims = TokenClaims {
            user_id: 1,
            jti: "abc".to_string(),
            token_type: TokenType::Refresh,
            iat: 0,
            exp: 0,
            email: None,
            uid: None,
        };
        assert_eq!(require_jti(&claims).unwrap(), "abc");

        claims.jti = String::new();
        assert!(matches!(require_jti(&claims), Err(TokenError::ClaimMissing("jti"))));
    }

    #[actix_web::test]
    async fn test_obtain_registers_refresh_token() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();

        let access = f.codec.decode(&session.access_token, true).unwrap();
        let refresh = f.codec.decode(&session.refresh_token, true).unwrap();
        assert_eq!(access.user_id, 42);
        assert_eq!(refresh.user_id, 42);
        assert_eq!(access.email.as_deref(), Some("user@example.com"));

        assert_eq!(session.cache_key, refresh_token_key(42, &refresh.jti));
        assert_eq!(session.refresh_ttl_seconds, 86_400);
        assert_eq!(
            f.store.get(&session.cache_key).await.unwrap().as_deref(),
            Some(session.refresh_token.as_str())
        );
    }

    #[actix_web::test]
    async fn test_cache_entry_expires_with_refresh_lifetime() {
        let f = fixture();
        let session = f.service.obtain(&identity(1)).await.unwrap();

        f.clock.advance(Duration::hours(23));
        assert!(f.service.is_active(&session.refresh_token).await.unwrap());

        f.clock.advance(Duration::hours(1));
        assert!(f.store.get(&session.cache_key).await.unwrap().is_none());
        assert!(!f.service.is_active(&session.refresh_token).await.unwrap());
    }

    #[actix_web::test]
    async fn test_rotate_replaces_entry() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();
        let next = f.codec.issue_pair(42, &CustomClaims::default()).unwrap();

        let new_key = f.service.rotate(&session.refresh_token, &next.refresh_token).await.unwrap();

        assert_eq!(f.store.keys().unwrap(), vec![new_key.clone()]);
        assert!(!f.service.is_active(&session.refresh_token).await.unwrap());
        assert!(f.service.is_active(&next.refresh_token).await.unwrap());
    }

    #[actix_web::test]
    async fn test_rotate_twice_with_same_old_token() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();
        let first = f.codec.issue_pair(42, &CustomClaims::default()).unwrap();
        let second = f.codec.issue_pair(42, &CustomClaims::default()).unwrap();

        f.service.rotate(&session.refresh_token, &first.refresh_token).await.unwrap();
        let result = f.service.rotate(&session.refresh_token, &second.refresh_token).await;

        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn test_rotate_with_unparseable_old_token_still_stores_new() {
        let f = fixture();
        let next = f.codec.issue_pair(5, &CustomClaims::default()).unwrap();

        let new_key = f.service.rotate("garbage", &next.refresh_token).await.unwrap();

        assert_eq!(f.store.keys().unwrap(), vec![new_key]);
    }

    #[actix_web::test]
    async fn test_rotate_accepts_expired_old_token() {
        let f = fixture();
        let session = f.service.obtain(&identity(3)).await.unwrap();
        f.clock.advance(Duration::days(2));
        let next = f.codec.issue_pair(3, &CustomClaims::default()).unwrap();

        let result = f.service.rotate(&session.refresh_token, &next.refresh_token).await;
        assert!(result.is_ok());
    }

    /// 삭제만 실패하는 저장소
    struct DeleteFailingStore {
        inner: Arc<InMemoryTokenStore>,
    }

    #[async_trait::async_trait]
    impl TokenStore for DeleteFailingStore {
        async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), TokenError> {
            self.inner.set(key, value, ttl_seconds).await
        }

        async fn get(&self, key: &str) -> Result<Option<String>, TokenError> {
            self.inner.get(key).await
        }

        async fn delete(&self, _key: &str) -> Result<u64, TokenError> {
            Err(TokenError::CacheUnavailable("connection reset".to_string()))
        }
    }

    #[actix_web::test]
    async fn test_rotate_fails_closed_when_old_entry_cannot_be_deleted() {
        let f = fixture();
        let failing = RefreshTokenService::new(
            f.codec.clone(),
            Arc::new(DeleteFailingStore { inner: f.store.clone() }),
        );
        let session = failing.obtain(&identity(42)).await.unwrap();

        let result = failing.refresh(&session.refresh_token).await;

        assert!(matches!(result, Err(TokenError::CacheUnavailable(_))));
        assert_eq!(f.store.keys().unwrap(), vec![session.cache_key]);
        assert!(failing.is_active(&session.refresh_token).await.unwrap());
    }

    #[actix_web::test]
    async fn test_rotate_rejects_invalid_new_token() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();

        let result = f.service.rotate(&session.refresh_token, "not-a-jwt").await;
        assert!(matches!(result, Err(TokenError::TokenProcessing(_))));
    }

    #[actix_web::test]
    async fn test_revoke_rejects_other_users_token() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();

        let result = f.service.revoke(&session.refresh_token, 7).await;
        assert!(matches!(
            result,
            Err(TokenError::OwnershipMismatch { token_user_id: 42, requesting_user_id: 7 })
        ));
        assert_eq!(f.store.keys().unwrap(), vec![session.cache_key]);
    }

    #[actix_web::test]
    async fn test_revoke_twice_is_not_found() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();

        f.service.revoke(&session.refresh_token, 42).await.unwrap();
        let result = f.service.revoke(&session.refresh_token, 42).await;

        assert!(matches!(result, Err(TokenError::NotFound)));
    }

    #[actix_web::test]
    async fn test_revoke_expired_token_is_invalid() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();
        f.clock.advance(Duration::days(2));

        let result = f.service.revoke(&session.refresh_token, 42).await;
        assert!(matches!(
            result,
            Err(TokenError::InvalidToken(InvalidTokenKind::Expired))
        ));
    }

    #[actix_web::test]
    async fn test_refresh_mints_new_session_and_rotates() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();

        let refreshed = f.service.refresh(&session.refresh_token).await.unwrap();

        let access = f.codec.decode_expecting(&refreshed.access_token, TokenType::Access).unwrap();
        assert_eq!(access.user_id, 42);
        assert_eq!(access.uid.as_deref(), Some("kakao-1"));
        assert_eq!(f.store.keys().unwrap(), vec![refreshed.cache_key]);
    }

    #[actix_web::test]
    async fn test_refresh_rejects_rotated_and_revoked_tokens() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();
        let refreshed = f.service.refresh(&session.refresh_token).await.unwrap();

        let reused = f.service.refresh(&session.refresh_token).await;
        assert!(matches!(reused, Err(TokenError::NotFound)));

        f.service.revoke(&refreshed.refresh_token, 42).await.unwrap();
        let revoked = f.service.refresh(&refreshed.refresh_token).await;
        assert!(matches!(revoked, Err(TokenError::NotFound)));
    }

    #[actix_web::test]
    async fn test_refresh_rejects_access_token() {
        let f = fixture();
        let session = f.service.obtain(&identity(42)).await.unwrap();

        let result = f.service.refresh(&session.access_token).await;
        assert!(matches!(
            result,
            Err(TokenError::InvalidToken(InvalidTokenKind::Malformed))
        ));
    }

    #[actix_web::test]
    async fn test_full_lifecycle_scenario() {
        let f = fixture();

        let session = f.service.obtain(&identity(42)).await.unwrap();
        let first_key = session.cache_key.clone();
        assert_eq!(f.store.keys().unwrap(), vec![first_key.clone()]);

        let next = f.codec.issue_pair(42, &CustomClaims::default()).unwrap();
        let second_key = f.service.rotate(&session.refresh_token, &next.refresh_token).await.unwrap();
        assert_ne!(first_key, second_key);
        assert_eq!(f.store.keys().unwrap(), vec![second_key]);

        f.service.revoke(&next.refresh_token, 42).await.unwrap();
        assert!(f.store.keys().unwrap().is_empty());

        let again = f.service.revoke(&next.refresh_token, 42).await;
        assert!(matches!(again, Err(TokenError::NotFound)));
    }
}
