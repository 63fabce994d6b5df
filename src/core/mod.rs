//! # Core Framework Module
//!
//! 리본 백엔드의 공통 기반 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 싱글톤 인스턴스 보관 및 `Arc<T>` 필드 주입
//! - **자동 레지스트리**: `#[service]`, `#[repository]` 매크로가 `inventory`로 제출한
//!   등록 정보를 수집
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//!
//! ## 초기화 순서
//!
//! ```rust,ignore
//! use reborn_backend::core::registry::ServiceLocator;
//! use reborn_backend::db::Database;
//!
//! let database = Arc::new(Database::connect().await?);
//! database.migrate().await?;
//!
//! ServiceLocator::set(database);          // 인프라 컴포넌트 직접 등록
//! ServiceLocator::initialize_all().await?; // 리포지토리 → 서비스 순으로 생성
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
