//! Reborns Entity Module
//!
//! 리본 상품 목록([`Reborn`])과 이웃의 교환 태스크([`RebornTask`])를 정의합니다.
//! 두 엔티티의 상태 값은 서로 다른 열거형이며 섞어 쓰지 않습니다.

pub mod reborn;
pub mod reborn_task;

pub use reborn::{Reborn, RebornStatus};
pub use reborn_task::{RebornTask, RebornTaskStatus};
