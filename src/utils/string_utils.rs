//! # 문자열 유틸리티
//!
//! 요청 값 정리와 로그용 토큰 마스킹에 쓰이는 공통 함수들입니다.

use crate::errors::AppError;

/// 로그에 남길 토큰 앞부분 길이
const TOKEN_PREVIEW_LEN: usize = 10;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  kakao-123  ", "uid").unwrap(), "kakao-123");
/// assert!(validate_required_string("   ", "uid").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Seoul  ".to_string())), Some("Seoul".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// assert_eq!(clean_optional_string(None), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 로그 출력용 토큰 미리보기
///
/// 서명된 토큰 전체를 로그에 남기지 않도록 앞 10글자만 반환합니다.
/// 멀티바이트 문자가 섞여 있어도 문자 경계에서 자릅니다.
pub fn token_preview(token: &str) -> &str {
    match token.char_indices().nth(TOKEN_PREVIEW_LEN) {
        Some((end, _)) => &token[..end],
        None => token,
    }
}
