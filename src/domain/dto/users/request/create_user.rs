//! # 회원가입 요청 DTO
//!
//! 이웃 회원가입([`CreateUserRequest`])과 가게 운영자 회원가입([`CreateUserStoreRequest`])을 정의합니다.
//!
//! ## 검증 규칙
//!
//! - `user_email`: 이메일 형식, 중복 여부는 리포지토리에서 UNIQUE 제약으로 판정
//! - `user_pwd`: 8자 이상, 영문과 숫자 포함
//! - `user_nickname`: 1-20자
//! - `user_phone`: 숫자와 하이픈만 허용

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::entities::stores::StoreCategory;
use crate::utils::string_utils::deserialize_optional_string;

/// 이웃 회원가입 요청
///
/// ```json
/// {
///   "user_email": "neighbor@reborn.kr",
///   "user_pwd": "reborn1234",
///   "user_nickname": "빵순이",
///   "user_name": "홍길동",
///   "user_phone": "010-1234-5678"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub user_email: String,

    #[validate(length(min = 8, max = 64, message = "비밀번호는 8-64자 사이여야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub user_pwd: String,

    #[validate(length(min = 1, max = 20, message = "닉네임은 1-20자 사이여야 합니다"))]
    pub user_nickname: String,

    #[validate(length(min = 1, max = 30, message = "이름은 1-30자 사이여야 합니다"))]
    pub user_name: String,

    #[validate(custom(function = "validate_phone"))]
    pub user_phone: String,
}

/// 가게 운영자 회원가입 요청
///
/// 계정 정보와 가게 정보를 함께 받아 한 트랜잭션으로 생성합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserStoreRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub user: CreateUserRequest,

    #[validate(length(min = 1, max = 50, message = "가게 이름은 1-50자 사이여야 합니다"))]
    pub store_name: String,

    #[validate(length(min = 1, max = 200, message = "가게 주소는 1-200자 사이여야 합니다"))]
    pub store_address: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub store_description: Option<String>,

    #[serde(default)]
    pub category: StoreCategory,
}

/// 비밀번호는 영문과 숫자를 모두 포함해야 합니다.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_alpha = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_alpha && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 영문과 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();

    if !phone.chars().all(|c| c.is_ascii_digit() || c == '-') || !(9..=11).contains(&digits) {
        return Err(ValidationError::new("invalid_phone")
            .with_message("전화번호 형식이 올바르지 않습니다".into()));
    }

    Ok(())
}
