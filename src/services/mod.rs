//! # Application Services
//!
//! `#[service]` 매크로로 관리되는 비즈니스 로직 계층입니다.
//! 서비스는 리포지토리를 `Arc`로 주입받고, 권한 확인과 응답 DTO 변환을 담당합니다.
//!
//! - [`users`] - 가입, 로그인, 포인트, 계정/가게 상태
//! - [`stores`] - 가게 조회, 검색, 정보 수정
//! - [`reborns`] - 리본 상품, 교환 신청, 교환 완료, 재고 차감
//! - [`auth`] - JWT 발급과 검증

pub mod users;
pub mod stores;
pub mod reborns;
pub mod auth;
