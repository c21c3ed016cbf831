use async_trait::async_trait;

use crate::domain::models::auth::{SocialLogin, UserIdentity};
use crate::errors::AppResult;

/// 소셜 계정을 내부 사용자 식별 정보로 변환하는 외부 협력자
///
/// 같은 `(provider, uid)`는 항상 같은 `user_id`로 해석되어야 합니다.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn resolve(&self, login: &SocialLogin) -> AppResult<UserIdentity>;
}
