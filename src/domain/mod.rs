//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - SQLite 테이블과 대응되는 영속 엔티티와 상태 열거형
//! ├── dto       - HTTP 요청/응답 구조체
//! └── models    - 인증 컨텍스트와 JWT 클레임
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```
//!
//! 상태 값(`RebornStatus`, `RebornTaskStatus`, `StoreStatus`, `UserStatus`)은 모두 닫힌 열거형이며,
//! 문자열 비교 대신 패턴 매칭으로 다룹니다.

pub mod entities;
pub mod dto;
pub mod models;
