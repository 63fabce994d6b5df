//! Database Connection Management Module
//!
//! SQLite 커넥션 풀과 스키마 마이그레이션, 트랜잭션 경계를 관리합니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! export DATABASE_URL="sqlite://reborn.db?mode=rwc"
//! export DATABASE_MAX_CONNECTIONS="5"
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//! use crate::core::registry::ServiceLocator;
//!
//! let database = Database::connect().await?;
//! database.migrate().await?;
//! ServiceLocator::set(Arc::new(database));
//! ```
//!
//! # 트랜잭션
//!
//! 여러 문장으로 이루어진 워크플로우는 [`Database::begin`]으로 얻은 트랜잭션 안에서
//! 실행합니다. `commit()`을 호출하지 않고 트랜잭션이 drop되면 롤백됩니다.

use std::str::FromStr;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use log::info;
use crate::config::DatabaseConfig;
use crate::core::errors::AppError;

#[cfg(test)]
pub(crate) mod fixtures;

/// SQLite 커넥션 풀 래퍼
///
/// 리포지토리 계층은 `sqlite: Arc<Database>` 필드로 주입받아 사용합니다.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 환경 변수 설정으로 데이터베이스에 연결합니다.
    pub async fn connect() -> Result<Self, AppError> {
        Self::connect_with_url(&DatabaseConfig::url()).await
    }

    /// 주어진 URL로 연결합니다.
    ///
    /// 외래 키 제약을 켜고, 동시 쓰기 시 잠금 대기를 위해 `busy_timeout`을 설정합니다.
    pub async fn connect_with_url(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(DatabaseConfig::max_connections())
            .acquire_timeout(DatabaseConfig::acquire_timeout())
            .connect_with(options)
            .await?;

        info!("✅ SQLite 연결 성공: {}", url);

        Ok(Self { pool })
    }

    /// 테스트용 인메모리 데이터베이스
    ///
    /// 인메모리 SQLite는 커넥션마다 별도의 데이터베이스가 생기므로
    /// 단일 커넥션을 수명 제한 없이 유지합니다. 마이그레이션까지 적용된 상태로 반환됩니다.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.migrate().await?;
        Ok(database)
    }

    /// `migrations/` 디렉터리의 스키마를 적용합니다.
    pub async fn migrate(&self) -> Result<(), AppError> {
        info!("📐 마이그레이션 적용 중...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ 마이그레이션 완료");
        Ok(())
    }

    /// 스코프 트랜잭션을 시작합니다.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, AppError> {
        Ok(self.pool.begin().await?)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
