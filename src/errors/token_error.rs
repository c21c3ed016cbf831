//! 토큰 생명주기 에러 분류
//!
//! 토큰 코덱, 토큰 캐시 저장소, 리프레시 토큰 서비스가 반환하는 에러입니다.
//! 각 변형은 [`TokenError::is_client_fault`]로 클라이언트 책임(400)과
//! 서버 책임(500)으로 나뉘며, HTTP 계층은 이 구분만으로 상태 코드를 결정합니다.
//!
//! | 변형 | 책임 | HTTP |
//! |------|------|------|
//! | `InvalidToken` | 클라이언트 | 400 |
//! | `OwnershipMismatch` | 클라이언트 | 400 |
//! | `NotFound` | 클라이언트 | 400 |
//! | `ClaimMissing` | 서버 | 500 |
//! | `TokenProcessing` | 서버 | 500 |
//! | `CacheUnavailable` | 서버 | 500 |
//! | `SigningKeyMissing` | 서버 | 500 |
//! | `Signing` | 서버 | 500 |

use std::fmt;

use thiserror::Error;

/// 토큰이 유효하지 않은 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenKind {
    /// `exp`가 지난 토큰
    Expired,
    /// 구조, 인코딩, 클레임 형식이 잘못된 토큰
    Malformed,
    /// 서명 검증 실패
    BadSignature,
}

impl fmt::Display for InvalidTokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InvalidTokenKind::Expired => "token has expired",
            InvalidTokenKind::Malformed => "token is malformed",
            InvalidTokenKind::BadSignature => "token signature is invalid",
        };
        f.write_str(label)
    }
}

impl From<&jsonwebtoken::errors::Error> for InvalidTokenKind {
    fn from(err: &jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => InvalidTokenKind::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                InvalidTokenKind::BadSignature
            }
            _ => InvalidTokenKind::Malformed,
        }
    }
}

/// 토큰 발급, 순환, 무효화 과정의 에러
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenKind),

    #[error("Token is missing the `{0}` claim")]
    ClaimMissing(&'static str),

    #[error("Token processing failed: {0}")]
    TokenProcessing(String),

    #[error("Token belongs to user {token_user_id}, not to requesting user {requesting_user_id}")]
    OwnershipMismatch {
        token_user_id: i64,
        requesting_user_id: i64,
    },

    #[error("Refresh token not found or already revoked")]
    NotFound,

    #[error("Token cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("JWT signing key is not configured")]
    SigningKeyMissing,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl TokenError {
    /// 클라이언트가 제시한 토큰 때문에 발생한 에러인지 여부
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidToken(_)
                | TokenError::OwnershipMismatch { .. }
                | TokenError::NotFound
        )
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        TokenError::InvalidToken(InvalidTokenKind::from(&err))
    }
}
