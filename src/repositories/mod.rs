//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로로 싱글톤으로 관리되며, 모두 `Arc<Database>`를 주입받아
//! `sqlx` 파라미터 바인딩 쿼리로 SQLite에 접근합니다.
//!
//! - [`users`] - 계정, 포인트, 가게 운영자 가입 트랜잭션
//! - [`stores`] - 가게 조회/검색/수정
//! - [`reborns`] - 리본 상품, 교환 태스크, 재고 차감
//!
//! ```rust,ignore
//! use crate::repositories::reborns::RebornRepository;
//!
//! let reborn_repo = RebornRepository::instance();
//! reborn_repo.decrease_product_cnt(reborn_idx).await?;
//! ```

pub mod users;
pub mod stores;
pub mod reborns;
