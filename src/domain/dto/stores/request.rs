//! 가게 요청 DTO

use serde::Deserialize;
use validator::Validate;
use crate::domain::entities::stores::StoreCategory;
use crate::utils::string_utils::deserialize_optional_string;

/// 가게 검색 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreSort {
    /// 최근 수정 순
    #[default]
    None,
    /// 이름 오름차순
    Name,
    /// 평점 내림차순
    Score,
    /// 찜 많은 순
    Jjim,
}

impl StoreSort {
    /// 검색 쿼리에 붙일 ORDER BY 절
    pub fn order_by(&self) -> &'static str {
        match self {
            StoreSort::None => "s.updated_at DESC",
            StoreSort::Name => "s.store_name ASC",
            StoreSort::Score => "s.store_score DESC",
            StoreSort::Jjim => "jjim_cnt DESC, s.store_idx ASC",
        }
    }
}

/// `GET /api/v1/stores/search?keyword=빵&sort=SCORE`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchStoreQuery {
    #[serde(default)]
    pub keyword: String,

    #[serde(default)]
    pub sort: StoreSort,
}

/// 가게 정보 수정 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 1, max = 50, message = "가게 이름은 1-50자 사이여야 합니다"))]
    pub store_name: String,

    #[validate(length(min = 1, max = 200, message = "가게 주소는 1-200자 사이여야 합니다"))]
    pub store_address: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub store_description: Option<String>,

    #[serde(default)]
    pub category: StoreCategory,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub store_image: Option<String>,
}
