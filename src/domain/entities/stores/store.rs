//! Store Entity Implementation
//!
//! 가게는 `STORE` 타입 계정 하나에 소속되며, 리본 상품 목록의 소유자입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::domain::entities::sqlite_text_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreStatus {
    Active,
    Inactive,
}

impl StoreStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "ACTIVE" => Ok(StoreStatus::Active),
            "INACTIVE" => Ok(StoreStatus::Inactive),
            _ => Err(format!("Unknown store status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Active => "ACTIVE",
            StoreStatus::Inactive => "INACTIVE",
        }
    }
}

sqlite_text_enum!(StoreStatus);

/// 가게 업종
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreCategory {
    Cafe,
    Bakery,
    Restaurant,
    Mart,
    #[default]
    Etc,
}

impl StoreCategory {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "CAFE" => Ok(StoreCategory::Cafe),
            "BAKERY" => Ok(StoreCategory::Bakery),
            "RESTAURANT" => Ok(StoreCategory::Restaurant),
            "MART" => Ok(StoreCategory::Mart),
            "ETC" => Ok(StoreCategory::Etc),
            _ => Err(format!("Unknown store category: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreCategory::Cafe => "CAFE",
            StoreCategory::Bakery => "BAKERY",
            StoreCategory::Restaurant => "RESTAURANT",
            StoreCategory::Mart => "MART",
            StoreCategory::Etc => "ETC",
        }
    }
}

sqlite_text_enum!(StoreCategory);

/// 가게 엔티티 (`store` 테이블)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Store {
    pub store_idx: i64,
    /// 운영자 계정
    pub user_idx: i64,
    pub store_name: String,
    pub store_address: String,
    pub store_description: Option<String>,
    pub store_image: Option<String>,
    pub category: StoreCategory,
    pub store_score: f64,
    pub status: StoreStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn is_owned_by(&self, user_idx: i64) -> bool {
        self.user_idx == user_idx
    }
}
