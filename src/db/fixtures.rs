//! 테스트용 시드 데이터

use std::path::PathBuf;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use super::Database;

/// 임시 파일 기반 데이터베이스
///
/// 인메모리 풀과 달리 여러 커넥션을 사용하므로 동시에 실행되는 문장이 실제로 경합합니다.
/// drop 시 파일을 지웁니다.
pub struct TempDatabase {
    pub db: Arc<Database>,
    path: PathBuf,
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        let _ = std::fs::remove_file(self.path.with_extension("db-journal"));
    }
}

/// 마이그레이션이 적용된 다중 커넥션 풀 (`DATABASE_MAX_CONNECTIONS`, 기본 5)
pub async fn file_database() -> TempDatabase {
    let path = std::env::temp_dir().join(format!("reborn-test-{}.db", Uuid::new_v4()));
    let url = format!("sqlite://{}?mode=rwc", path.display());

    let database = Database::connect_with_url(&url).await.unwrap();
    database.migrate().await.unwrap();

    TempDatabase {
        db: Arc::new(database),
        path,
    }
}

pub async fn insert_user(db: &Database, email: &str, user_type: &str) -> i64 {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO user (user_email, user_pwd, user_nickname, user_name, user_phone, user_type, created_at, updated_at) \
         VALUES (?, 'not-a-real-hash', '이웃', '홍길동', '010-0000-0000', ?, ?, ?)",
    )
    .bind(email)
    .bind(user_type)
    .bind(now)
    .bind(now)
    .execute(db.pool())
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn insert_store(db: &Database, user_idx: i64, store_name: &str) -> i64 {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO store (user_idx, store_name, store_address, category, created_at, updated_at) \
         VALUES (?, ?, '서울시 마포구', 'BAKERY', ?, ?)",
    )
    .bind(user_idx)
    .bind(store_name)
    .bind(now)
    .bind(now)
    .execute(db.pool())
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn insert_reborn(db: &Database, store_idx: i64, product_cnt: i64, status: &str) -> i64 {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO reborn (store_idx, product_name, product_guide, product_comment, product_limit_time, product_cnt, status, created_at, updated_at) \
         VALUES (?, '소금빵', '카운터에서 교환', '오늘 구운 빵', '21:00', ?, ?, ?, ?)",
    )
    .bind(store_idx)
    .bind(product_cnt)
    .bind(status)
    .bind(now)
    .bind(now)
    .execute(db.pool())
    .await
    .unwrap()
    .last_insert_rowid()
}

pub async fn insert_task(db: &Database, reborn_idx: i64, user_idx: i64, status: &str) -> i64 {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO reborn_task (reborn_idx, user_idx, product_exchange_code, status, created_at, updated_at) \
         VALUES (?, ?, 123456, ?, ?, ?)",
    )
    .bind(reborn_idx)
    .bind(user_idx)
    .bind(status)
    .bind(now)
    .bind(now)
    .execute(db.pool())
    .await
    .unwrap()
    .last_insert_rowid()
}

/// 상품의 (남은 수량, 상태) 스냅샷
pub async fn reborn_state(db: &Database, reborn_idx: i64) -> (i64, String) {
    sqlx::query_as("SELECT product_cnt, status FROM reborn WHERE reborn_idx = ?")
        .bind(reborn_idx)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

pub async fn reborn_updated_at(db: &Database, reborn_idx: i64) -> DateTime<Utc> {
    let (updated_at,): (DateTime<Utc>,) = sqlx::query_as("SELECT updated_at FROM reborn WHERE reborn_idx = ?")
        .bind(reborn_idx)
        .fetch_one(db.pool())
        .await
        .unwrap();
    updated_at
}

pub async fn set_reborn_updated_at(db: &Database, reborn_idx: i64, updated_at: DateTime<Utc>) {
    sqlx::query("UPDATE reborn SET updated_at = ? WHERE reborn_idx = ?")
        .bind(updated_at)
        .bind(reborn_idx)
        .execute(db.pool())
        .await
        .unwrap();
}

pub async fn task_status(db: &Database, reborn_task_idx: i64) -> String {
    let (status,): (String,) = sqlx::query_as("SELECT status FROM reborn_task WHERE reborn_task_idx = ?")
        .bind(reborn_task_idx)
        .fetch_one(db.pool())
        .await
        .unwrap();
    status
}

/// 점주 계정, 가게, 이웃 계정을 한 번에 만듭니다. `(owner_idx, store_idx, neighbor_idx)`
pub async fn seed_store_with_neighbor(db: &Database) -> (i64, i64, i64) {
    let owner_idx = insert_user(db, "owner@reborn.kr", "STORE").await;
    let store_idx = insert_store(db, owner_idx, "리본 베이커리").await;
    let neighbor_idx = insert_user(db, "neighbor@reborn.kr", "USER").await;
    (owner_idx, store_idx, neighbor_idx)
}
