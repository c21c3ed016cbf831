//! # HTTP Handlers Module
//!
//! actix-web 핸들러 모음입니다. 핸들러는 요청 파싱과 쿠키 처리만 담당하고,
//! 토큰 라이프사이클과 프로필 로직은 `web::Data<AppContext>`의 서비스에 위임합니다.
//!
//! - `token_handlers` - 액세스 토큰 발급/갱신, 리프레시 토큰 폐기
//! - `users` - 본인 프로필 조회/수정/삭제
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, 에러는
//! `AppError`의 `ResponseError` 구현으로 `{"error": "..."}` JSON이 됩니다.

pub mod token_handlers;
pub mod users;
