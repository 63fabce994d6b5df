//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조체를 정의합니다.
//! 요청 DTO는 `validator`로 검증하고, 응답 DTO는 엔티티에서 `From`으로 변환하거나
//! 조인 조회 결과를 `sqlx::FromRow`로 바로 매핑합니다.
//!
//! ```text
//! dto/
//! ├── users/      # 회원가입, 로그인, 포인트, 회원 정보
//! ├── stores/     # 가게 목록, 검색, 정보 수정
//! └── reborns/    # 리본 상품, 교환 신청, 교환 내역
//! ```
//!
//! 검증 실패는 핸들러에서 `AppError::ValidationError`로 변환되어 400 응답이 됩니다.

pub mod users;
pub mod stores;
pub mod reborns;
