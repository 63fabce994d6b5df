//! 리본 상품 등록/수정 요청 DTO

use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 리본 상품 등록 요청
///
/// ```json
/// {
///   "store_idx": 3,
///   "product_name": "소금빵",
///   "product_guide": "카운터에서 교환 코드를 보여주세요",
///   "product_comment": "오늘 아침에 구운 빵입니다",
///   "product_img": null,
///   "product_limit_time": "21:00",
///   "product_cnt": 5
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRebornRequest {
    pub store_idx: i64,

    #[validate(length(min = 1, max = 100, message = "상품 이름은 1-100자 사이여야 합니다"))]
    pub product_name: String,

    #[validate(length(min = 1, max = 500, message = "교환 안내는 1-500자 사이여야 합니다"))]
    pub product_guide: String,

    #[validate(length(max = 500, message = "상품 설명은 500자 이하여야 합니다"))]
    pub product_comment: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub product_img: Option<String>,

    #[validate(length(min = 1, message = "교환 마감 시각을 입력해주세요"))]
    pub product_limit_time: String,

    #[validate(range(min = 1, message = "수량은 1개 이상이어야 합니다"))]
    pub product_cnt: i64,
}

/// 리본 상품 수정 요청
///
/// 수량을 0으로 바꾸면 상품은 `INACTIVE`가 되고, 0보다 크게 바꾸면 다시 `ACTIVE`가 됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatchRebornRequest {
    #[validate(length(min = 1, max = 100, message = "상품 이름은 1-100자 사이여야 합니다"))]
    pub product_name: String,

    #[validate(length(min = 1, max = 500, message = "교환 안내는 1-500자 사이여야 합니다"))]
    pub product_guide: String,

    #[validate(length(max = 500, message = "상품 설명은 500자 이하여야 합니다"))]
    pub product_comment: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub product_img: Option<String>,

    #[validate(length(min = 1, message = "교환 마감 시각을 입력해주세요"))]
    pub product_limit_time: String,

    #[validate(range(min = 0, message = "수량은 0 이상이어야 합니다"))]
    pub product_cnt: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_stock() {
        let req: CreateRebornRequest = serde_json::from_value(serde_json::json!({
            "store_idx": 1,
            "product_name": "소금빵",
            "product_guide": "카운터에서 교환",
            "product_comment": "",
            "product_limit_time": "21:00",
            "product_cnt": 0
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("product_cnt"));
    }

    #[test]
    fn test_blank_image_becomes_none() {
        let req: PatchRebornRequest = serde_json::from_value(serde_json::json!({
            "product_name": "소금빵",
            "product_guide": "카운터에서 교환",
            "product_comment": "",
            "product_img": "   ",
            "product_limit_time": "21:00",
            "product_cnt": 0
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        assert!(req.product_img.is_none());
    }
}
