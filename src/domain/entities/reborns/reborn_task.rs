//! Redemption Task Entity
//!
//! 이웃이 리본 상품을 교환하겠다고 신청한 기록입니다.
//! 삭제되지 않고 상태만 바뀝니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::domain::entities::sqlite_text_enum;

/// 교환 태스크 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebornTaskStatus {
    /// 교환 대기
    Active,
    /// 교환 완료
    Complete,
    /// 취소됨
    Inactive,
}

impl RebornTaskStatus {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "ACTIVE" => Ok(RebornTaskStatus::Active),
            "COMPLETE" => Ok(RebornTaskStatus::Complete),
            "INACTIVE" => Ok(RebornTaskStatus::Inactive),
            _ => Err(format!("Unknown reborn task status: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RebornTaskStatus::Active => "ACTIVE",
            RebornTaskStatus::Complete => "COMPLETE",
            RebornTaskStatus::Inactive => "INACTIVE",
        }
    }
}

sqlite_text_enum!(RebornTaskStatus);

/// 교환 태스크 엔티티 (`reborn_task` 테이블)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RebornTask {
    pub reborn_task_idx: i64,
    pub reborn_idx: i64,
    pub user_idx: i64,
    /// 매장에서 확인하는 6자리 교환 코드
    pub product_exchange_code: i64,
    pub status: RebornTaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
