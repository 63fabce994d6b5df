use serde::Serialize;
use chrono::{DateTime, Utc};
use crate::config::UserType;
use crate::domain::entities::users::{User, UserStatus};
use crate::domain::models::token::TokenPair;

/// 사용자 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_idx: i64,
    pub user_email: String,
    pub user_nickname: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_type: UserType,
    pub user_point: i64,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            user_idx,
            user_email,
            user_nickname,
            user_name,
            user_phone,
            user_type,
            user_point,
            status,
            created_at,
            ..
        } = user;

        Self {
            user_idx,
            user_email,
            user_nickname,
            user_name,
            user_phone,
            user_type,
            user_point,
            status,
            created_at,
        }
    }
}

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub user_idx: i64,
    pub user_nickname: String,
    pub jwt: String,
}

/// 가게 운영자 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserStoreResponse {
    pub store_idx: i64,
    pub user_idx: i64,
    pub store_name: String,
    pub jwt: String,
}

/// 포인트 변경 결과
#[derive(Debug, Clone, Serialize)]
pub struct PointResponse {
    pub user_idx: i64,
    pub user_point: i64,
}

/// 로그인 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

impl LoginResponse {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token: tokens.access_token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in,
            refresh_token: tokens.refresh_token,
        }
    }
}
