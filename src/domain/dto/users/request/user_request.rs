//! 회원 정보 변경 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 포인트 변경 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointAction {
    /// 적립
    Save,
    /// 적립 취소 (차감)
    Cancel,
}

/// `PATCH /api/v1/users/points`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditPointRequest {
    pub action: PointAction,

    #[validate(range(min = 1, max = 1_000_000, message = "포인트는 1-1,000,000 사이여야 합니다"))]
    pub point: i64,
}

impl EditPointRequest {
    /// 잔액에 더할 값 (취소는 음수)
    pub fn delta(&self) -> i64 {
        match self.action {
            PointAction::Save => self.point,
            PointAction::Cancel => -self.point,
        }
    }
}

/// `PATCH /api/v1/users`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModifyUserInformRequest {
    #[validate(length(min = 1, max = 20, message = "닉네임은 1-20자 사이여야 합니다"))]
    pub user_nickname: String,
}
