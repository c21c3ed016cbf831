//! JWT 클레임 구조체 및 토큰 쌍
//!
//! 액세스 토큰과 리프레시 토큰은 같은 클레임 구조를 공유하며,
//! `token_type`으로 용도를 구분합니다.

use serde::{Deserialize, Serialize};

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// API 접근용 단기 토큰 (서버에 저장하지 않음)
    Access,
    /// 토큰 갱신용 장기 토큰 (캐시에 `(user_id, jti)`로 저장)
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `user_id`: 내부 사용자 ID
/// - `jti`: 토큰 인스턴스마다 새로 생성되는 고유 ID (캐시 키 구분자)
/// - `token_type`: `access` 또는 `refresh`
/// - `iat` / `exp`: 발급 및 만료 시간 (Unix timestamp)
/// - `email`, `uid`: 소셜 계정에서 온 선택적 커스텀 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: i64,
    pub jti: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

impl TokenClaims {
    /// 토큰에 실린 커스텀 클레임만 추출합니다.
    pub fn custom_claims(&self) -> CustomClaims {
        CustomClaims {
            email: self.email.clone(),
            uid: self.uid.clone(),
        }
    }
}

/// 발급 시 토큰에 추가로 싣는 클레임
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomClaims {
    pub email: Option<String>,
    pub uid: Option<String>,
}

/// 한 번에 발급된 액세스/리프레시 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰
    pub access_token: String,
    /// 리프레시 토큰
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
