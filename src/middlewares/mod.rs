//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인에서 JWT 인증과 역할 검증을 담당합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <access token>` 추출 및 검증
//! - 검증된 사용자를 request extension에 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)로 저장
//! - 필수/선택 인증 모드와 역할(`user`, `store`) 요구사항 지원
//!
//! # 사용 방법
//!
//! ## 스코프 전체에 적용
//! ```rust,ignore
//! web::scope("/api/v1/me")
//!     .wrap(AuthMiddleware::required())
//!     .service(handlers::users::get_user)
//! ```
//!
//! ## 개별 핸들러에 적용
//! ```rust,ignore
//! #[post("", wrap = "AuthMiddleware::store_owner()")]
//! pub async fn create_reborn(auth: AuthenticatedUser, ...) -> Result<HttpResponse, AppError> { ... }
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
