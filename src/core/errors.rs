//! # Application Error Handling System
//!
//! 리본 백엔드 전역에서 사용하는 에러 처리 시스템입니다.
//! 모든 계층(리포지토리, 서비스, 핸들러)은 [`AppError`]를 반환하며,
//! Actix-Web의 `ResponseError` 구현을 통해 일관된 JSON 응답으로 변환됩니다.
//!
//! ## 에러 분류
//!
//! | 변형 | HTTP 상태 | 코드 |
//! |------|-----------|------|
//! | `DatabaseError` | 500 | `DATABASE_ERROR` |
//! | `ValidationError` | 400 | `VALIDATION_ERROR` |
//! | `NotFound` | 404 | `NOT_FOUND` |
//! | `ConflictError` | 409 | `CONFLICT` |
//! | `AuthenticationError` | 401 | `AUTHENTICATION_FAILED` |
//! | `AuthorizationError` | 403 | `FORBIDDEN` |
//! | `StockUnavailable` | 409 | `STOCK_UNAVAILABLE` |
//! | `PreconditionNotMet` | 409 | `PRECONDITION_NOT_MET` |
//! | `InternalError` | 500 | `INTERNAL_ERROR` |
//!
//! ## 재고 관련 에러
//!
//! - `StockUnavailable`: 조건부 재고 차감이 0개의 행에 적용된 경우
//!   (재고 소진, 비활성 상품, 존재하지 않는 상품)
//! - `PreconditionNotMet`: 교환 완료 워크플로우의 선행 조건이 거짓인 경우
//! - `DatabaseError`: 그 외 모든 데이터 액세스 오류. 조회 결과가 없는 경우도
//!   여기에 포함되며, 일시적인 연결 오류와 구분하지 않습니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! let affected = sqlx::query("UPDATE reborn SET ...")
//!     .execute(self.sqlite.pool())
//!     .await?            // sqlx::Error -> AppError::DatabaseError
//!     .rows_affected();
//!
//! if affected != 1 {
//!     return Err(AppError::StockUnavailable("재고가 없습니다".to_string()));
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 조건부 재고 차감이 어떤 행에도 적용되지 않음
    #[error("Stock unavailable: {0}")]
    StockUnavailable(String),

    /// 워크플로우 선행 조건 불충족 (변경 사항 없음)
    #[error("Precondition not met: {0}")]
    PreconditionNotMet(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문에 포함되는 기계 판독용 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ConflictError(_) => "CONFLICT",
            AppError::AuthenticationError(_) => "AUTHENTICATION_FAILED",
            AppError::AuthorizationError(_) => "FORBIDDEN",
            AppError::StockUnavailable(_) => "STOCK_UNAVAILABLE",
            AppError::PreconditionNotMet(_) => "PRECONDITION_NOT_MET",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_)
            | AppError::StockUnavailable(_)
            | AppError::PreconditionNotMet(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code()
            }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::DatabaseError(format!("마이그레이션 실패: {}", err))
    }
}

/// 애플리케이션 전용 Result 타입
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 컨텍스트를 붙여 `InternalError`로 변환하는 확장 트레이트
///
/// ```rust,ignore
/// let hash = bcrypt::hash(password, cost).context("비밀번호 해싱 실패")?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
