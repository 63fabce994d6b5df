//! 리본 상품 및 교환 내역 응답 DTO
//!
//! 조인 조회 결과는 `FromRow`로 바로 매핑합니다.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use crate::domain::entities::reborns::{Reborn, RebornStatus, RebornTaskStatus};
use crate::domain::entities::stores::StoreCategory;

/// 리본 상품 응답
#[derive(Debug, Clone, Serialize)]
pub struct RebornResponse {
    pub reborn_idx: i64,
    pub store_idx: i64,
    pub product_name: String,
    pub product_guide: String,
    pub product_comment: String,
    pub product_img: Option<String>,
    pub product_limit_time: String,
    pub product_cnt: i64,
    pub status: RebornStatus,
}

impl From<Reborn> for RebornResponse {
    fn from(reborn: Reborn) -> Self {
        Self {
            reborn_idx: reborn.reborn_idx,
            store_idx: reborn.store_idx,
            product_name: reborn.product_name,
            product_guide: reborn.product_guide,
            product_comment: reborn.product_comment,
            product_img: reborn.product_img,
            product_limit_time: reborn.product_limit_time,
            product_cnt: reborn.product_cnt,
            status: reborn.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRebornResponse {
    pub reborn_idx: i64,
}

/// 교환 신청 결과
#[derive(Debug, Clone, Serialize)]
pub struct CreateRebornTaskResponse {
    pub reborn_task_idx: i64,
    pub product_exchange_code: i64,
}

/// 교환 태스크 상태 변경 결과
#[derive(Debug, Clone, Serialize)]
pub struct RebornTaskStatusResponse {
    pub reborn_task_idx: i64,
    pub status: RebornTaskStatus,
}

/// 가게 운영자가 보는 진행 중 교환 목록
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InProgressRebornResponse {
    pub reborn_task_idx: i64,
    pub reborn_idx: i64,
    pub store_idx: i64,
    pub store_name: String,
    pub category: StoreCategory,
    pub product_name: String,
    pub product_img: Option<String>,
    pub product_limit_time: String,
    pub product_cnt: i64,
}

/// 이웃의 교환 내역
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RebornHistoryResponse {
    pub reborn_task_idx: i64,
    pub store_name: String,
    pub store_score: f64,
    pub store_address: String,
    pub status: RebornTaskStatus,
    pub created_at: DateTime<Utc>,
}

/// 교환 내역 상세 (교환 코드 포함)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RebornHistoryDetailResponse {
    pub reborn_task_idx: i64,
    pub product_name: String,
    pub product_guide: String,
    pub product_comment: String,
    pub store_name: String,
    pub store_score: f64,
    pub store_address: String,
    pub product_exchange_code: i64,
    pub status: RebornTaskStatus,
    pub created_at: DateTime<Utc>,
}
