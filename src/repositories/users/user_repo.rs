//! # 사용자 리포지토리 구현
//!
//! 소셜 로그인 사용자와 프로필을 보관하는 인메모리 디렉터리입니다.
//! 사용자 계정의 원본은 외부 신원 시스템에 있으며, 이 리포지토리는
//! `(provider, uid)` → `user_id` 매핑과 프로필만 유지합니다.
//!
//! ## 특징
//!
//! - **안정적인 ID**: 같은 소셜 계정은 항상 같은 `user_id`
//! - **자동 가입**: 처음 보는 소셜 계정은 로그인 시 생성
//! - **부분 수정**: [`ProfilePatch`]에 포함된 필드만 변경

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::dto::users::ProfilePatch;
use crate::domain::entities::users::{User, UserProfile};
use crate::domain::models::auth::{SocialLogin, UserIdentity};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::identity_lookup::IdentityLookup;
use crate::utils::clock::{Clock, SystemClock};

pub struct UserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
    clock: Arc<dyn Clock>,
}

impl UserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            clock,
        }
    }

    /// 소셜 계정으로 사용자를 찾고, 없으면 새로 만듭니다.
    ///
    /// 이메일과 이름은 가입 시점에만 기록됩니다. 기존 사용자는 로그인 요청 값으로 바뀌지 않습니다.
    pub fn find_or_create(&self, login: &SocialLogin) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| lock_error())?;
        let now = self.clock.now();

        if let Some(user) = users
            .values()
            .find(|u| u.provider == login.provider && u.uid == login.uid)
        {
            return Ok(user.clone());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            username: format!("{}_{}", login.provider.as_str(), login.uid),
            email: login.email.clone(),
            provider: login.provider,
            uid: login.uid.clone(),
            profile: UserProfile {
                name: login.name.clone(),
                ..Default::default()
            },
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());

        log::info!("새 소셜 사용자 등록: id={}, provider={}", id, login.provider.as_str());
        Ok(user)
    }

    pub fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| lock_error())?;
        Ok(users.get(&id).cloned())
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 없는 경우
    pub fn update_profile(&self, id: i64, patch: ProfilePatch) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| lock_error())?;
        let user = users.get_mut(&id).ok_or_else(user_not_found)?;

        user.profile.apply(patch);
        user.updated_at = self.clock.now();
        Ok(user.clone())
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 없는 경우
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let mut users = self.users.write().map_err(|_| lock_error())?;
        users.remove(&id).map(|_| ()).ok_or_else(user_not_found)
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

fn lock_error() -> AppError {
    AppError::InternalError("user directory lock poisoned".to_string())
}

fn user_not_found() -> AppError {
    AppError::NotFound("사용자를 찾을 수 없습니다".to_string())
}

#[async_trait]
impl IdentityLookup for UserRepository {
    async fn resolve(&self, login: &SocialLogin) -> AppResult<UserIdentity> {
        Ok(self.find_or_create(login)?.identity())
    }
}
