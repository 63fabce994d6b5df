//! # 사용자 리포지토리 구현
//!
//! `user` 테이블의 데이터 액세스를 담당합니다.
//! 가게 운영자 가입은 `user`와 `store` 두 테이블에 걸친 트랜잭션으로 처리합니다.

use std::sync::Arc;
use chrono::Utc;
use singleton_macro::repository;
use crate::{
    config::UserType,
    core::errors::AppError,
    db::Database,
    domain::dto::users::{CreateUserRequest, CreateUserStoreRequest},
    domain::entities::users::{User, UserStatus},
};

/// 이메일 UNIQUE 제약 위반은 ConflictError, 나머지는 DatabaseError로 변환합니다.
fn map_insert_error(e: sqlx::Error) -> AppError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
        }
        _ => AppError::DatabaseError(e.to_string()),
    }
}

/// 사용자 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// - **ConflictError**: 이메일 중복, 포인트 잔액 부족
/// - **NotFound**: 포인트 변경 대상 계정 없음
/// - **DatabaseError**: 쿼리 실행 오류
#[repository(name = "user", collection = "user")]
pub struct UserRepository {
    sqlite: Arc<Database>,
}

impl UserRepository {
    /// 주어진 데이터베이스를 사용하는 인스턴스를 만듭니다. (테스트용)
    pub fn with_database(sqlite: Arc<Database>) -> Self {
        Self { sqlite }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM user WHERE user_email = ?")
            .bind(email)
            .fetch_optional(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_by_id(&self, user_idx: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM user WHERE user_idx = ?")
            .bind(user_idx)
            .fetch_optional(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 계정을 생성하고 ID를 반환합니다.
    ///
    /// `password_hash`는 이미 bcrypt로 해싱된 값이어야 합니다.
    pub async fn create(&self, req: &CreateUserRequest, password_hash: &str, user_type: UserType) -> Result<i64, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO user (user_email, user_pwd, user_nickname, user_name, user_phone, user_type, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.user_email)
        .bind(password_hash)
        .bind(&req.user_nickname)
        .bind(&req.user_name)
        .bind(&req.user_phone)
        .bind(user_type)
        .bind(UserStatus::Active)
        .bind(now)
        .bind(now)
        .execute(self.sqlite.pool())
        .await
        .map_err(map_insert_error)?;

        Ok(result.last_insert_rowid())
    }

    /// 가게 운영자 계정과 가게를 한 트랜잭션으로 생성합니다.
    ///
    /// 둘 중 하나라도 실패하면 아무것도 남지 않습니다. `(user_idx, store_idx)`를 반환합니다.
    pub async fn create_with_store(&self, req: &CreateUserStoreRequest, password_hash: &str) -> Result<(i64, i64), AppError> {
        let now = Utc::now();
        let mut tx = self.sqlite.begin().await?;

        let user_idx = sqlx::query(
            "INSERT INTO user (user_email, user_pwd, user_nickname, user_name, user_phone, user_type, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&req.user.user_email)
        .bind(password_hash)
        .bind(&req.user.user_nickname)
        .bind(&req.user.user_name)
        .bind(&req.user.user_phone)
        .bind(UserType::Store)
        .bind(UserStatus::Active)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?
        .last_insert_rowid();

        let store_idx = sqlx::query(
            "INSERT INTO store (user_idx, store_name, store_address, store_description, category, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 'ACTIVE', ?, ?)",
        )
        .bind(user_idx)
        .bind(&req.store_name)
        .bind(&req.store_address)
        .bind(&req.store_description)
        .bind(req.category)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .last_insert_rowid();

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok((user_idx, store_idx))
    }

    /// 포인트 잔액 변경
    ///
    /// 잔액이 음수가 되는 변경은 조건부 UPDATE에서 걸러지므로 동시 요청에도 안전합니다.
    /// 변경 후 잔액을 반환합니다.
    pub async fn add_point(&self, user_idx: i64, delta: i64) -> Result<i64, AppError> {
        let balance: Option<(i64,)> = sqlx::query_as(
            "UPDATE user SET user_point = user_point + ?, updated_at = ? \
              WHERE user_idx = ? AND status = 'ACTIVE' AND user_point + ? >= 0 \
              RETURNING user_point",
        )
        .bind(delta)
        .bind(Utc::now())
        .bind(user_idx)
        .bind(delta)
        .fetch_optional(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match balance {
            Some((user_point,)) => Ok(user_point),
            None => match self.find_by_id(user_idx).await? {
                Some(user) if user.is_active() => Err(AppError::ConflictError(format!(
                    "포인트 잔액이 부족합니다 (잔액 {}, 요청 {})",
                    user.user_point, delta
                ))),
                _ => Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다 (user_idx={})", user_idx))),
            },
        }
    }

    /// 계정 상태 변경. 영향받은 행 수를 반환합니다.
    pub async fn update_status(&self, user_idx: i64, status: UserStatus) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE user SET status = ?, updated_at = ? WHERE user_idx = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(user_idx)
            .execute(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// 닉네임 변경. 탈퇴한 계정은 변경되지 않습니다.
    pub async fn update_nickname(&self, user_idx: i64, user_nickname: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE user SET user_nickname = ?, updated_at = ? WHERE user_idx = ? AND status = 'ACTIVE'",
        )
        .bind(user_nickname)
        .bind(Utc::now())
        .bind(user_idx)
        .execute(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::join_all;
    use crate::db::fixtures::file_database;
    use crate::domain::entities::stores::StoreCategory;

    async fn setup() -> (Arc<Database>, UserRepository) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let repo = UserRepository::with_database(db.clone());
        (db, repo)
    }

    fn create_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            user_email: email.to_string(),
            user_pwd: "reborn1234".to_string(),
            user_nickname: "빵순이".to_string(),
            user_name: "홍길동".to_string(),
            user_phone: "010-1234-5678".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_create_and_find_user() {
        let (_db, repo) = setup().await;

        let user_idx = repo.create(&create_request("a@reborn.kr"), "hash", UserType::User).await.unwrap();

        let user = repo.find_by_email("a@reborn.kr").await.unwrap().unwrap();
        assert_eq!(user.user_idx, user_idx);
        assert_eq!(user.user_type, UserType::User);
        assert_eq!(user.user_point, 0);
        assert!(user.is_active());
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict() {
        let (_db, repo) = setup().await;
        repo.create(&create_request("dup@reborn.kr"), "hash", UserType::User).await.unwrap();

        let result = repo.create(&create_request("dup@reborn.kr"), "hash", UserType::User).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_create_with_store_rolls_back_on_duplicate() {
        let (db, repo) = setup().await;
        let req = CreateUserStoreRequest {
            user: create_request("owner@reborn.kr"),
            store_name: "리본 베이커리".to_string(),
            store_address: "서울시 마포구".to_string(),
            store_description: None,
            category: StoreCategory::Bakery,
        };

        let (user_idx, store_idx) = repo.create_with_store(&req, "hash").await.unwrap();
        let owner = repo.find_by_id(user_idx).await.unwrap().unwrap();
        assert!(owner.is_store_owner());
        assert!(store_idx > 0);

        let duplicate = repo.create_with_store(&req, "hash").await;
        assert!(matches!(duplicate, Err(AppError::ConflictError(_))));

        let (stores,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM store")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stores, 1);
    }

    #[actix_web::test]
    async fn test_point_balance_never_goes_negative() {
        let temp = file_database().await;
        let repo = Arc::new(UserRepository::with_database(temp.db.clone()));
        let user_idx = repo.create(&create_request("p@reborn.kr"), "hash", UserType::User).await.unwrap();

        assert_eq!(repo.add_point(user_idx, 500).await.unwrap(), 500);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let repo = repo.clone();
                actix_web::rt::spawn(async move { repo.add_point(user_idx, -200).await })
            })
            .collect();
        let results: Vec<_> = join_all(handles).await.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 2);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(AppError::ConflictError(_)))));

        let user = repo.find_by_id(user_idx).await.unwrap().unwrap();
        assert_eq!(user.user_point, 100);
    }

    #[actix_web::test]
    async fn test_point_change_for_missing_or_inactive_user() {
        let (_db, repo) = setup().await;
        let user_idx = repo.create(&create_request("gone@reborn.kr"), "hash", UserType::User).await.unwrap();
        assert_eq!(repo.update_status(user_idx, UserStatus::Inactive).await.unwrap(), 1);

        assert!(matches!(repo.add_point(user_idx, 10).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.add_point(9999, 10).await, Err(AppError::NotFound(_))));
        assert_eq!(repo.update_nickname(user_idx, "새이름").await.unwrap(), 0);
    }
}
