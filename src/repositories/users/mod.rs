//! 사용자 데이터 액세스 계층
//!
//! [`UserRepository`](user_repo::UserRepository)는 소셜 계정 → 내부 사용자 매핑과
//! 프로필을 보관하며, [`IdentityLookup`](identity_lookup::IdentityLookup)을 구현합니다.
//!
//! ```rust,ignore
//! let users = Arc::new(UserRepository::default());
//! let identity = users.resolve(&login).await?;
//! ```

pub mod identity_lookup;
pub mod user_repo;

pub use identity_lookup::IdentityLookup;
pub use user_repo::UserRepository;
