use serde::{Deserialize, Serialize};

/// 로그인 사용자 요약 정보
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: Option<String>,
    pub email: Option<String>,
}

/// 액세스 토큰 발급 응답
///
/// 리프레시 토큰은 본문이 아닌 `refresh_token` 쿠키로 전달됩니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct ObtainTokenResponse {
    pub access: String,
    pub user_info: UserInfo,
    pub message: String,
}

/// 액세스 토큰 갱신 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access: String,
}

/// 본문 데이터가 없는 성공 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
