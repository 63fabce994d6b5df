//! Reborn Listing Entity
//!
//! 가게가 올린 마감 할인 상품입니다. 남은 수량(`product_cnt`)과 상태는 항상 함께 움직입니다.
//!
//! - `ACTIVE`이면 남은 수량은 1 이상입니다.
//! - 남은 수량이 0이면 `ACTIVE`가 아닙니다.
//! - 남은 수량은 음수가 되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::domain::entities::sqlite_text_enum;

/// 리본 상품 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebornStatus {
    /// 교환 가능 (남은 수량 > 0)
    Active,
    /// 품절 또는 판매 중지
    Inactive,
    /// 삭제됨 (soft delete)
    Delete,
}

impl RebornStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "ACTIVE" => Ok(RebornStatus::Active),
            "INACTIVE" => Ok(RebornStatus::Inactive),
            "DELETE" => Ok(RebornStatus::Delete),
            _ => Err(format!("Unknown reborn status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RebornStatus::Active => "ACTIVE",
            RebornStatus::Inactive => "INACTIVE",
            RebornStatus::Delete => "DELETE",
        }
    }

    /// 남은 수량에 대응하는 상태
    pub fn for_remaining(product_cnt: i64) -> Self {
        if product_cnt > 0 {
            RebornStatus::Active
        } else {
            RebornStatus::Inactive
        }
    }
}

sqlite_text_enum!(RebornStatus);

/// 리본 상품 엔티티 (`reborn` 테이블)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Reborn {
    pub reborn_idx: i64,
    pub store_idx: i64,
    pub product_name: String,
    /// 교환 안내
    pub product_guide: String,
    pub product_comment: String,
    pub product_img: Option<String>,
    /// 교환 마감 시각 (가게가 입력한 값 그대로 보관)
    pub product_limit_time: String,
    pub product_cnt: i64,
    pub status: RebornStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reborn {
    /// 지금 한 개를 교환할 수 있는 상태인지 확인
    pub fn is_redeemable(&self) -> bool {
        self.status == RebornStatus::Active && self.product_cnt > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(product_cnt: i64, status: RebornStatus) -> Reborn {
        let now = Utc::now();
        Reborn {
            reborn_idx: 1,
            store_idx: 1,
            product_name: "소금빵".to_string(),
            product_guide: "매장 카운터에서 교환".to_string(),
            product_comment: "오늘 구운 빵".to_string(),
            product_img: None,
            product_limit_time: "21:00".to_string(),
            product_cnt,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_for_remaining_count() {
        assert_eq!(RebornStatus::for_remaining(3), RebornStatus::Active);
        assert_eq!(RebornStatus::for_remaining(1), RebornStatus::Active);
        assert_eq!(RebornStatus::for_remaining(0), RebornStatus::Inactive);
    }

    #[test]
    fn test_redeemable_requires_active_and_stock() {
        assert!(listing(1, RebornStatus::Active).is_redeemable());
        assert!(!listing(0, RebornStatus::Active).is_redeemable());
        assert!(!listing(5, RebornStatus::Inactive).is_redeemable());
        assert!(!listing(5, RebornStatus::Delete).is_redeemable());
    }

    #[test]
    fn test_status_text_mapping() {
        assert_eq!(RebornStatus::from_str("DELETE").unwrap(), RebornStatus::Delete);
        assert!(RebornStatus::from_str("COMPLETE").is_err());
        assert_eq!(RebornStatus::Inactive.as_str(), "INACTIVE");
    }
}
