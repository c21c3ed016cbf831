use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;

/// 프로필 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    /// 사용자명
    pub user: String,
    pub uid: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            uid,
            profile,
            ..
        } = user;

        Self {
            id,
            user: username,
            uid,
            name: profile.name,
            bio: profile.bio,
            location: profile.location,
            profile_picture: profile.profile_picture,
        }
    }
}
