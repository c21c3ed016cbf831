use serde::Deserialize;
use validator::Validate;

/// 프로필 부분 수정 요청 DTO
///
/// `PATCH /profile/me` 본문. 전달된 필드만 수정되며 알 수 없는 필드는 거부합니다.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProfilePatch {
    #[validate(length(max = 255, message = "이름은 255자를 넘을 수 없습니다"))]
    pub name: Option<String>,

    #[validate(url(message = "bio는 유효한 URL이어야 합니다"))]
    pub bio: Option<String>,

    #[validate(length(max = 255, message = "지역은 255자를 넘을 수 없습니다"))]
    pub location: Option<String>,

    #[validate(url(message = "프로필 이미지는 유효한 URL이어야 합니다"))]
    pub profile_picture: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.profile_picture.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patch() {
        let patch = ProfilePatch {
            bio: Some("https://blog.example.com".to_string()),
            location: Some("Seoul".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let patch = ProfilePatch {
            profile_picture: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ProfilePatch, _> = serde_json::from_str(r#"{"uid": "x"}"#);
        assert!(result.is_err());
    }
}
