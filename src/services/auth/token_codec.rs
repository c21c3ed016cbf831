//! JWT 토큰 코덱
//!
//! HS256 서명 기반의 액세스/리프레시 토큰 발급과 디코딩을 담당합니다.
//! 만료 판정은 `jsonwebtoken`의 시스템 시계 대신 주입된 [`Clock`]을 사용합니다.
//!
//! # 토큰 구조
//!
//! ```text
//! { "user_id": 42, "jti": "<uuid v4>", "token_type": "refresh",
//!   "iat": 1700000000, "exp": 1700086400, "email": "...", "uid": "..." }
//! ```

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::domain::models::token::{CustomClaims, TokenClaims, TokenPair, TokenType};
use crate::errors::{InvalidTokenKind, TokenError};
use crate::utils::clock::Clock;

/// 토큰 발급/디코딩기
///
/// 애플리케이션 시작 시 한 번 생성되어 `Arc`로 공유됩니다.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// # Errors
    ///
    /// * `TokenError::SigningKeyMissing` - 서명 키가 비어 있는 경우
    pub fn new(settings: &JwtSettings, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        if settings.secret.trim().is_empty() {
            return Err(TokenError::SigningKeyMissing);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            access_lifetime: settings.access_lifetime,
            refresh_lifetime: settings.refresh_lifetime,
            clock,
        })
    }

    /// 액세스/리프레시 토큰 쌍을 발급합니다.
    ///
    /// 두 토큰은 같은 `user_id`와 커스텀 클레임을 가지며, `jti`는 각각 새로 생성됩니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::Signing` - JWT 인코딩 실패
    pub fn issue_pair(&self, user_id: i64, custom: &CustomClaims) -> Result<TokenPair, TokenError> {
        let access_token = self.issue(user_id, TokenType::Access, self.access_lifetime, custom)?;
        let refresh_token = self.issue(user_id, TokenType::Refresh, self.refresh_lifetime, custom)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_lifetime.num_seconds(),
        })
    }

    fn issue(
        &self,
        user_id: i64,
        token_type: TokenType,
        lifetime: Duration,
        custom: &CustomClaims,
    ) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(|| {
            TokenError::Signing(format!("{} 토큰 만료 시각 계산 실패", token_type.as_str()))
        })?;

        let claims = TokenClaims {
            user_id,
            jti: Uuid::new_v4().simple().to_string(),
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            email: custom.email.clone(),
            uid: custom.uid.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(format!("{} 토큰 생성 실패: {}", token_type.as_str(), e)))
    }

    /// 토큰을 디코딩합니다.
    ///
    /// `verify`가 `false`이면 서명과 만료를 확인하지 않고 클레임만 읽습니다.
    /// 순환 시 이미 만료되었을 수 있는 이전 토큰의 `jti`를 찾을 때만 사용합니다.
    ///
    /// # Errors
    ///
    /// * `InvalidToken(Expired)` - 만료된 토큰 (`verify = true`)
    /// * `InvalidToken(BadSignature)` - 서명 불일치 (`verify = true`)
    /// * `InvalidToken(Malformed)` - 구조나 클레임 형식 오류
    pub fn decode(&self, token: &str, verify: bool) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;

        if !verify {
            validation.insecure_disable_signature_validation();
            validation.required_spec_claims.clear();
        }

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)?.claims;

        if verify && claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::InvalidToken(InvalidTokenKind::Expired));
        }

        Ok(claims)
    }

    /// 검증 후 토큰 용도까지 확인합니다.
    ///
    /// 액세스 토큰 자리에 리프레시 토큰이 오는 경우(또는 그 반대)는 `Malformed`로 취급합니다.
    pub fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token, true)?;

        if claims.token_type != expected {
            log::debug!(
                "토큰 용도 불일치: expected={}, actual={}",
                expected.as_str(),
                claims.token_type.as_str()
            );
            return Err(TokenError::InvalidToken(InvalidTokenKind::Malformed));
        }

        Ok(claims)
    }

    /// 리프레시 토큰 캐시 TTL (초)
    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_lifetime.num_seconds().max(0) as u64
    }
}
