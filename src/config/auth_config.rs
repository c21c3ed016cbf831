//! # Authentication Configuration Module
//!
//! JWT 서명 키와 토큰 수명, 리프레시 토큰 쿠키 속성, 소셜 로그인 프로바이더를
//! 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ACCESS_EXPIRATION_MINUTES="5"
//! export JWT_REFRESH_EXPIRATION_DAYS="1"
//! ```
//!
//! ### 리프레시 토큰 쿠키
//! ```bash
//! export REFRESH_COOKIE_SAMESITE="lax"   # lax | strict | none
//! ```
//!
//! ### 로그인 게이트웨이
//! ```bash
//! # 소셜 OAuth를 마친 게이트웨이가 X-Upstream-Auth 헤더로 보내는 공유 비밀
//! export UPSTREAM_AUTH_SECRET="shared-gateway-secret"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{JwtSettings, CookieSettings, SocialProvider};
//!
//! let jwt = JwtSettings::from_env()?;
//! let cookies = CookieSettings::from_env();
//! let provider = SocialProvider::from_str("kakao")?;
//! ```

use std::env;

use actix_web::cookie::SameSite;
use chrono::Duration;

use crate::config::data_config::Environment;
use crate::errors::TokenError;

/// 리프레시 토큰을 담는 쿠키 이름
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// 로그인 게이트웨이 자격 증명 헤더
pub const UPSTREAM_AUTH_HEADER: &str = "X-Upstream-Auth";

/// 개발/테스트 환경에서만 사용되는 서명 키
const INSECURE_DEV_SECRET: &str = "insecure-development-secret-change-me";

/// JWT 관련 환경 변수 접근자
///
/// ## 권장 설정값
///
/// - 액세스 토큰 5분, 리프레시 토큰 1일
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 설정되지 않았거나 빈 문자열이면 `None`을 반환합니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> Option<String> {
        env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    /// 액세스 토큰 수명 (분 단위, 기본값 5)
    pub fn access_expiration_minutes() -> i64 {
        positive_or_default("JWT_ACCESS_EXPIRATION_MINUTES", 5)
    }

    /// 리프레시 토큰 수명 (일 단위, 기본값 1)
    ///
    /// 캐시에 저장되는 리프레시 토큰의 TTL도 이 값으로 결정됩니다.
    pub fn refresh_expiration_days() -> i64 {
        positive_or_default("JWT_REFRESH_EXPIRATION_DAYS", 1)
    }
}

/// 로그인 게이트웨이 설정
///
/// `POST /access-token`은 OAuth 인증을 끝낸 게이트웨이만 호출할 수 있습니다.
/// 비밀이 설정되지 않으면 로그인 요청은 모두 거부됩니다.
pub struct UpstreamAuthConfig;

impl UpstreamAuthConfig {
    pub fn secret() -> Option<String> {
        env::var("UPSTREAM_AUTH_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
    }
}

fn positive_or_default(key: &str, default: i64) -> i64 {
    match env::var(key) {
        Ok(raw) => match raw.parse::<i64>() {
            Ok(value) if value > 0 => value,
            _ => {
                log::warn!("{} 값이 올바르지 않습니다 ({}). 기본값 {} 사용", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// 설정값을 `Duration`으로 바꿀 수 없을 만큼 크면 기본값을 사용합니다.
fn lifetime_or_default(
    key: &str,
    value: i64,
    to_duration: fn(i64) -> Option<Duration>,
    default: Duration,
) -> Duration {
    to_duration(value).unwrap_or_else(|| {
        log::warn!("{} 값이 너무 큽니다 ({}). 기본값 사용", key, value);
        default
    })
}

/// 토큰 코덱 생성에 필요한 설정 묶음
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// HS256 서명 키
    pub secret: String,
    /// 액세스 토큰 수명
    pub access_lifetime: Duration,
    /// 리프레시 토큰 수명 (= 캐시 TTL)
    pub refresh_lifetime: Duration,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, access_lifetime: Duration, refresh_lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// 환경 변수에서 설정을 읽어옵니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::SigningKeyMissing` - 스테이징/프로덕션에서 `JWT_SECRET`이 없는 경우
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = match JwtConfig::secret() {
            Some(secret) => secret,
            None if Environment::current().allows_insecure_defaults() => {
                log::warn!("JWT_SECRET not set, using development default (not secure for production!)");
                INSECURE_DEV_SECRET.to_string()
            }
            None => return Err(TokenError::SigningKeyMissing),
        };

        Ok(Self::new(
            secret,
            lifetime_or_default(
                "JWT_ACCESS_EXPIRATION_MINUTES",
                JwtConfig::access_expiration_minutes(),
                Duration::try_minutes,
                Duration::minutes(5),
            ),
            lifetime_or_default(
                "JWT_REFRESH_EXPIRATION_DAYS",
                JwtConfig::refresh_expiration_days(),
                Duration::try_days,
                Duration::days(1),
            ),
        ))
    }

    /// 리프레시 토큰 캐시 TTL (초)
    pub fn refresh_ttl_seconds(&self) -> u64 {
        self.refresh_lifetime.num_seconds().max(0) as u64
    }
}

/// 리프레시 토큰 쿠키 속성
///
/// 쿠키는 항상 HttpOnly이며, 개발 환경이 아니면 Secure 속성이 붙습니다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieSettings {
    pub fn from_env() -> Self {
        let same_site = match env::var("REFRESH_COOKIE_SAMESITE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        };

        Self {
            secure: Environment::current() != Environment::Development,
            same_site,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

/// 지원하는 소셜 로그인 프로바이더
///
/// OAuth 인증 자체는 외부에서 처리되며, 이 서비스는 인증이 끝난
/// `(provider, uid)` 쌍만 전달받습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Kakao,
    Naver,
    GitHub,
}

impl SocialProvider {
    /// 문자열에서 SocialProvider를 생성합니다. (대소문자 무관)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "kakao" => Ok(SocialProvider::Kakao),
            "naver" => Ok(SocialProvider::Naver),
            "github" => Ok(SocialProvider::GitHub),
            _ => Err(format!("Unsupported social provider: {}", s)),
        }
    }

    /// 이메일 도메인에서 프로바이더를 추정합니다.
    ///
    /// `user@gmail.com` → Google, `user@kakao.com` → Kakao, `user@naver.com` → Naver
    pub fn from_email_domain(email: &str) -> Option<Self> {
        let domain = email.rsplit_once('@')?.1;
        let label = domain.split('.').next()?.to_lowercase();

        match label.as_str() {
            "gmail" => Some(SocialProvider::Google),
            "kakao" => Some(SocialProvider::Kakao),
            "naver" => Some(SocialProvider::Naver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialProvider::Google => "google",
            SocialProvider::Kakao => "kakao",
            SocialProvider::Naver => "naver",
            SocialProvider::GitHub => "github",
        }
    }
}
