//! # 문자열 유틸리티
//!
//! 요청 필드 정리와 검색어 처리에 쓰는 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열을 trim하고, 비어 있으면 ValidationError를 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(validate_required_string("  소금빵  ", "keyword").unwrap(), "소금빵");
/// assert!(validate_required_string("   ", "keyword").is_err());
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

/// 빈 문자열이나 공백뿐인 값을 None으로 정리합니다.
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

/// 선택 문자열 필드용 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`로 사용하며,
/// null, 빈 문자열, 공백뿐인 문자열은 모두 None이 됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 부분 일치 검색용 `LIKE` 패턴을 만듭니다.
///
/// `%`, `_`, `\`는 이스케이프되므로 쿼리에 `ESCAPE '\'`를 함께 지정해야 합니다.
pub fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
