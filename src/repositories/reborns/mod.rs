//! 리본 상품과 교환 태스크의 데이터 액세스 계층
//!
//! 재고 차감과 교환 완료 처리는 [`RebornRepository`](reborn_repo::RebornRepository)에서
//! 조건부 단일 UPDATE와 트랜잭션으로 수행합니다.

pub mod reborn_repo;

pub use reborn_repo::RebornRepository;
