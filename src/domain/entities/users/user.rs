//! 사용자 엔티티
//!
//! 소셜 로그인으로 가입한 사용자와 프로필 정보를 나타냅니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SocialProvider;
use crate::domain::dto::users::ProfilePatch;
use crate::domain::models::auth::UserIdentity;
use crate::utils::string_utils::clean_optional_string;

/// 소셜 계정으로 가입한 사용자
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// 내부 사용자 ID
    pub id: i64,
    /// 표시용 사용자명
    pub username: String,
    pub email: Option<String>,
    /// 가입에 사용한 소셜 프로바이더
    pub provider: SocialProvider,
    /// 프로바이더가 발급한 계정 UID
    pub uid: String,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 토큰 발급에 쓰이는 신원 정보로 변환합니다.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            user_id: self.id,
            email: self.email.clone(),
            uid: Some(self.uid.clone()),
        }
    }
}

/// 사용자 프로필
///
/// 수정 가능한 필드는 [`ProfilePatch`]에 나열된 것뿐입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    /// 개인 페이지 URL
    pub bio: Option<String>,
    pub location: Option<String>,
    /// 프로필 이미지 URL
    pub profile_picture: Option<String>,
}

impl UserProfile {
    /// 부분 수정 적용
    ///
    /// 요청에 포함된 필드만 변경하며, 빈 문자열은 값을 지웁니다.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = clean_optional_string(Some(name));
        }
        if let Some(bio) = patch.bio {
            self.bio = clean_optional_string(Some(bio));
        }
        if let Some(location) = patch.location {
            self.location = clean_optional_string(Some(location));
        }
        if let Some(profile_picture) = patch.profile_picture {
            self.profile_picture = clean_optional_string(Some(profile_picture));
        }
    }
}
