//! 인증 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 이메일/비밀번호 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub user_email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub user_pwd: String,
}

/// 리프레시 토큰으로 토큰 쌍을 재발급하는 요청
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}
