use serde::Deserialize;
use validator::Validate;

use crate::config::SocialProvider;
use crate::domain::models::auth::SocialLogin;
use crate::errors::{AppError, AppResult};
use crate::utils::string_utils::{clean_optional_string, validate_required_string};

/// 액세스 토큰 발급 요청 DTO
///
/// 상위 OAuth 계층이 인증을 마친 소셜 계정 정보를 전달합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct SocialLoginRequest {
    /// `google`, `kakao`, `naver`, `github`. 생략하면 이메일 도메인으로 추정합니다.
    pub provider: Option<String>,

    #[validate(length(min = 1, max = 255, message = "uid는 1-255자 사이여야 합니다"))]
    pub uid: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(max = 255, message = "이름은 255자를 넘을 수 없습니다"))]
    pub name: Option<String>,
}

impl SocialLoginRequest {
    pub fn into_social_login(self) -> AppResult<SocialLogin> {
        let email = clean_optional_string(self.email);

        let provider = match clean_optional_string(self.provider) {
            Some(provider) => SocialProvider::from_str(&provider).map_err(AppError::ValidationError)?,
            None => email
                .as_deref()
                .and_then(SocialProvider::from_email_domain)
                .ok_or_else(|| AppError::ValidationError("provider is required".to_string()))?,
        };

        Ok(SocialLogin {
            provider,
            uid: validate_required_string(&self.uid, "uid")?,
            email,
            name: clean_optional_string(self.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(provider: &str, uid: &str, email: Option<&str>) -> SocialLoginRequest {
        SocialLoginRequest {
            provider: Some(provider.to_string()),
            uid: uid.to_string(),
            email: email.map(str::to_string),
            name: None,
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let req = request("Kakao", " 12345 ", Some("user@kakao.com"));
        assert!(req.validate().is_ok());

        let login = req.into_social_login().unwrap();
        assert_eq!(login.provider, SocialProvider::Kakao);
        assert_eq!(login.uid, "12345");
        assert_eq!(login.email.as_deref(), Some("user@kakao.com"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(request("google", "1", Some("not-an-email")).validate().is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = request("myspace", "1", None).into_social_login();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_provider_inferred_from_email() {
        let mut req = request("", "1", Some("someone@gmail.com"));
        req.provider = None;
        assert_eq!(req.into_social_login().unwrap().provider, SocialProvider::Google);

        let mut req = request("", "1", Some("someone@example.com"));
        req.provider = None;
        assert!(matches!(req.into_social_login(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_blank_uid_rejected() {
        let result = request("naver", "   ", None).into_social_login();
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
