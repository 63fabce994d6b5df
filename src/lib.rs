//! 리본 마켓플레이스 백엔드
//!
//! 동네 가게가 마감 전 남은 상품("리본")을 올리고, 이웃이 교환을 신청해
//! 매장에서 교환 코드로 받아가는 서비스의 REST API 서버입니다.
//!
//! # Features
//!
//! - **회원**: 이웃/가게 운영자 회원가입, 로그인, 포인트 적립/취소, 탈퇴
//! - **가게**: 목록/상세/위치 조회, 이름 검색과 정렬, 정보 수정
//! - **리본 상품**: 등록/수정/삭제, 교환 신청/취소, 교환 내역
//! - **재고 차감**: 단일 조건부 UPDATE로 초과 판매 없이 한 개씩 차감
//! - **교환 완료**: 재고 차감과 태스크 완료를 하나의 트랜잭션으로 처리
//! - **JWT 인증**: HS256 액세스/리프레시 토큰, 역할(`user`, `store`) 기반 접근 제어
//! - **싱글톤 DI**: 매크로 기반 자동 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 입력 검증, 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 소유권 확인, 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 조건부 UPDATE, 트랜잭션
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     SQLite      │ ← sqlx 커넥션 풀
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use reborn_backend::services::reborns::RebornService;
//!
//! let service = RebornService::instance();
//! let reborn = service.decrease_product_cnt(&auth, reborn_idx).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
