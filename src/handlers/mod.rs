//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 받아 입력을 검증하고, 싱글톤 서비스를 호출한 뒤
//! 결과를 JSON 응답으로 돌려주는 얇은 계층입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리
//! ├─────────────────────────────────────────────┤
//!   Services - 소유권 확인, 응답 변환
//! ├─────────────────────────────────────────────┤
//!   Repositories - 조건부 UPDATE, 트랜잭션
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 공통 규칙
//!
//! - 요청 본문은 `validator`로 검증하고 실패하면 `AppError::ValidationError` (400)
//! - 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며 에러 응답은
//!   `{"error": ..., "code": ...}` 형태로 통일됩니다.
//! - 인증이 필요한 핸들러는 `AuthenticatedUser` 추출자를 인자로 받습니다.
//!   토큰 검증과 역할 확인은 [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 먼저 수행합니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 로그인, 토큰 갱신, 토큰 검증
//! - **`users`**: 회원가입(이웃/가게), 포인트, 탈퇴, 닉네임 변경, 내 정보
//! - **`stores`**: 가게 목록/상세/위치/검색, 가게 정보 수정, 가게 비활성화
//! - **`reborns`**: 리본 상품 관리, 교환 신청/취소, 교환 내역, 교환 완료, 재고 차감

pub mod auth;
pub mod users;
pub mod stores;
pub mod reborns;
