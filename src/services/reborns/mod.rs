//! 리본 상품 서비스
//!
//! 상품 등록/수정/삭제, 교환 신청과 취소, 교환 완료, 재고 차감을 담당하는
//! [`RebornService`]를 제공합니다.

pub mod reborn_service;

pub use reborn_service::RebornService;
