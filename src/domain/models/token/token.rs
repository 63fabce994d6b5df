//! JWT 클레임과 토큰 쌍
//!
//! 액세스 토큰과 리프레시 토큰은 같은 클레임 구조를 쓰고 `token_type`으로 구분합니다.
use serde::{Deserialize, Serialize};
use crate::config::UserType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 사용자 ID (`user_idx`의 문자열 표현)
/// - `user_type`: `USER` / `STORE`
/// - `roles`: 역할 목록
/// - `token_type`: `access` / `refresh`
/// - `iat`, `exp`: 발급/만료 시각 (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub user_type: UserType,
    pub roles: Vec<String>,
    pub token_type: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// 클라이언트에게 전달되는 토큰 집합
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
