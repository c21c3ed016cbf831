//! # Application Context
//!
//! `main`에서 한 번 조립되어 `web::Data<AppContext>`로 모든 워커에 공유되는 의존성 묶음입니다.
//! 전역 싱글톤 없이 저장소와 시계를 생성자 인자로 주입받습니다.
//!
//! ```text
//! AppContext
//! ├── codec           Arc<TokenCodec>          (액세스 토큰 검증: 미들웨어)
//! ├── refresh_tokens  RefreshTokenService       (Obtain / Rotate / Revoke)
//! │     └── store     Arc<dyn TokenStore>       (Redis | InMemory)
//! ├── users           UserService               (프로필)
//! ├── identity        Arc<dyn IdentityLookup>   (provider, uid → user_id)
//! ├── cookies         CookieSettings
//! └── upstream_secret Option<Arc<str>>          (로그인 게이트웨이 자격 증명)
//! ```

use std::sync::Arc;

use crate::caching::TokenStore;
use crate::config::{CookieSettings, JwtSettings};
use crate::errors::TokenError;
use crate::repositories::users::{IdentityLookup, UserRepository};
use crate::services::auth::{RefreshTokenService, TokenCodec};
use crate::services::users::UserService;
use crate::utils::clock::Clock;

#[derive(Clone)]
pub struct AppContext {
    pub codec: Arc<TokenCodec>,
    pub refresh_tokens: RefreshTokenService,
    pub users: UserService,
    pub identity: Arc<dyn IdentityLookup>,
    pub cookies: CookieSettings,
    pub upstream_secret: Option<Arc<str>>,
}

impl AppContext {
    /// # Errors
    ///
    /// * `TokenError::SigningKeyMissing` - 서명 키가 비어 있는 경우
    pub fn new(
        jwt: &JwtSettings,
        store: Arc<dyn TokenStore>,
        users: Arc<UserRepository>,
        cookies: CookieSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TokenError> {
        let codec = Arc::new(TokenCodec::new(jwt, clock)?);

        Ok(Self {
            refresh_tokens: RefreshTokenService::new(codec.clone(), store),
            users: UserService::new(users.clone()),
            identity: users,
            codec,
            cookies,
            upstream_secret: None,
        })
    }

    /// 로그인 게이트웨이 공유 비밀을 설정합니다. 빈 값은 무시됩니다.
    pub fn with_upstream_secret(mut self, secret: impl AsRef<str>) -> Self {
        let secret = secret.as_ref().trim();
        self.upstream_secret = (!secret.is_empty()).then(|| Arc::from(secret));
        self
    }
}
