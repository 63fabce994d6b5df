//! User Entity Implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::config::UserType;
use crate::domain::entities::sqlite_text_enum;

/// 계정 상태
///
/// 탈퇴한 계정은 삭제하지 않고 `INACTIVE`로 남깁니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "ACTIVE" => Ok(UserStatus::Active),
            "INACTIVE" => Ok(UserStatus::Inactive),
            _ => Err(format!("Unknown user status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }
}

sqlite_text_enum!(UserStatus);

/// 사용자 엔티티 (`user` 테이블)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub user_idx: i64,
    /// 로그인 ID (unique)
    pub user_email: String,
    /// bcrypt 해시
    #[serde(skip_serializing)]
    pub user_pwd: String,
    pub user_nickname: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_type: UserType,
    /// 적립 포인트 잔액 (항상 0 이상)
    pub user_point: i64,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn is_store_owner(&self) -> bool {
        self.user_type == UserType::Store
    }

    /// 토큰에 기록할 역할 목록
    pub fn roles(&self) -> Vec<String> {
        self.user_type.roles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_text_mapping() {
        assert_eq!(UserStatus::from_str("ACTIVE").unwrap(), UserStatus::Active);
        assert_eq!(UserStatus::from_str("INACTIVE").unwrap(), UserStatus::Inactive);
        assert!(UserStatus::from_str("active").is_err());
        assert_eq!(UserStatus::Inactive.as_str(), "INACTIVE");
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let now = Utc::now();
        let user = User {
            user_idx: 1,
            user_email: "neighbor@reborn.kr".to_string(),
            user_pwd: "$2b$04$hash".to_string(),
            user_nickname: "이웃".to_string(),
            user_name: "홍길동".to_string(),
            user_phone: "010-0000-0000".to_string(),
            user_type: UserType::User,
            user_point: 0,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("user_pwd").is_none());
        assert_eq!(json["user_type"], "USER");
        assert!(user.is_active());
        assert!(!user.is_store_owner());
    }
}
