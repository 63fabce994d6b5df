//! 가게 응답 DTO

use serde::Serialize;
use crate::domain::entities::stores::{Store, StoreCategory};

#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    pub store_idx: i64,
    pub store_name: String,
    pub store_image: Option<String>,
    pub store_address: String,
    pub store_description: Option<String>,
    pub category: StoreCategory,
    pub store_score: f64,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            store_idx: store.store_idx,
            store_name: store.store_name,
            store_image: store.store_image,
            store_address: store.store_address,
            store_description: store.store_description,
            category: store.category,
            store_score: store.store_score,
        }
    }
}

/// 가게 상세 조회 응답
///
/// 로그인한 이웃이면 `is_jjim`에 본인의 찜 여부가 들어가고, 익명 조회는 항상 `false`입니다.
#[derive(Debug, Clone, Serialize)]
pub struct StoreDetailResponse {
    #[serde(flatten)]
    pub store: StoreResponse,
    pub is_jjim: bool,
}

/// 지도 표시용 가게 위치 정보
#[derive(Debug, Clone, Serialize)]
pub struct StoreLocationResponse {
    pub store_idx: i64,
    pub store_name: String,
    pub store_address: String,
    pub store_score: f64,
}

impl From<Store> for StoreLocationResponse {
    fn from(store: Store) -> Self {
        Self {
            store_idx: store.store_idx,
            store_name: store.store_name,
            store_address: store.store_address,
            store_score: store.store_score,
        }
    }
}
