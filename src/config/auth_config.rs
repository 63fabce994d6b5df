//! 인증 및 JWT 관련 설정
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```

use std::env;
use serde::{Deserialize, Serialize};
use crate::domain::entities::sqlite_text_enum;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "reborn-secret-key".to_string()
            })
    }

    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}

/// 계정 종류
///
/// 일반 이웃(`USER`)과 가게 운영자(`STORE`)는 같은 `user` 테이블에 저장되고
/// 이 값으로 구분됩니다. 토큰에는 해당하는 역할(`user`, `store`)이 실립니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    User,
    Store,
}

impl UserType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(UserType::User),
            "STORE" => Ok(UserType::Store),
            _ => Err(format!("Unsupported user type: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::User => "USER",
            UserType::Store => "STORE",
        }
    }

    /// 토큰에 기록되는 역할 목록
    pub fn roles(&self) -> Vec<String> {
        match self {
            UserType::User => vec!["user".to_string()],
            UserType::Store => vec!["store".to_string()],
        }
    }
}

sqlite_text_enum!(UserType);
