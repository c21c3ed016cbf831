pub mod authenticated_user;
pub mod user_identity;

pub use authenticated_user::*;
pub use user_identity::*;
