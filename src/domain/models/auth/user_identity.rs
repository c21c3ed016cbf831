//! 외부 신원 확인 결과

use serde::{Deserialize, Serialize};

use crate::config::SocialProvider;
use crate::domain::models::token::CustomClaims;

/// 상위 OAuth 계층에서 인증이 끝난 소셜 로그인 정보
#[derive(Debug, Clone, PartialEq)]
pub struct SocialLogin {
    pub provider: SocialProvider,
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// 신원 확인 후 얻은 내부 사용자 식별 정보
///
/// 토큰 발급의 유일한 입력이며, `user_id`는 캐시 키에 그대로 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: i64,
    pub email: Option<String>,
    pub uid: Option<String>,
}

impl UserIdentity {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            email: None,
            uid: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn custom_claims(&self) -> CustomClaims {
        CustomClaims {
            email: self.email.clone(),
            uid: self.uid.clone(),
        }
    }
}
