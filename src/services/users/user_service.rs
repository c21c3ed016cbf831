//! # 프로필 서비스
//!
//! 인증된 사용자 본인의 프로필 조회, 부분 수정, 삭제를 담당합니다.
//!
//! ```text
//! handlers::users ──▶ UserService ──▶ UserRepository
//!                      • 입력 검증 (ProfilePatch)
//!                      • Entity → DTO 변환
//! ```

use std::sync::Arc;

use validator::Validate;

use crate::domain::dto::users::{ProfilePatch, ProfileResponse};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserRepository;

#[derive(Clone)]
pub struct UserService {
    users: Arc<UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 토큰의 사용자가 디렉터리에 없는 경우
    pub fn get_profile(&self, user_id: i64) -> AppResult<ProfileResponse> {
        self.users
            .find_by_id(user_id)?
            .map(ProfileResponse::from)
            .ok_or_else(|| AppError::NotFound("프로필을 찾을 수 없습니다".to_string()))
    }

    /// 전달된 필드만 수정합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 필드 검증 실패 또는 빈 요청
    /// * `AppError::NotFound` - 사용자가 없는 경우
    pub fn update_profile(&self, user_id: i64, patch: ProfilePatch) -> AppResult<ProfileResponse> {
        patch.validate()?;
        if patch.is_empty() {
            return Err(AppError::ValidationError("수정할 필드가 없습니다".to_string()));
        }

        let user = self.users.update_profile(user_id, patch)?;
        log::info!("프로필 수정: user_id={}", user_id);

        Ok(ProfileResponse::from(user))
    }

    /// 프로필과 사용자 계정을 함께 삭제합니다.
    pub fn delete_profile(&self, user_id: i64) -> AppResult<()> {
        self.users.delete(user_id)?;
        log::info!("사용자 삭제: user_id={}", user_id);
        Ok(())
    }
}
