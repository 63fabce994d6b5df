//! # 가게 리포지토리
//!
//! `store` 테이블 조회, 검색, 정보 수정을 담당합니다.
//! 이웃에게 노출되는 조회는 모두 `ACTIVE` 가게만 대상으로 합니다.

use std::sync::Arc;
use chrono::Utc;
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::dto::stores::{StoreSort, UpdateStoreRequest},
    domain::entities::stores::{Store, StoreStatus},
};

#[repository(name = "store", collection = "store")]
pub struct StoreRepository {
    sqlite: Arc<Database>,
}

impl StoreRepository {
    /// 주어진 데이터베이스를 사용하는 인스턴스를 만듭니다. (테스트용)
    pub fn with_database(sqlite: Arc<Database>) -> Self {
        Self { sqlite }
    }

    /// 영업 중인 가게 목록 (최근 수정 순)
    pub async fn find_active(&self) -> Result<Vec<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM store WHERE status = 'ACTIVE' ORDER BY updated_at DESC, store_idx DESC")
            .fetch_all(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_active_by_id(&self, store_idx: i64) -> Result<Option<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM store WHERE store_idx = ? AND status = 'ACTIVE'")
            .bind(store_idx)
            .fetch_optional(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 상태와 관계없이 조회합니다. 소유자 확인에 사용합니다.
    pub async fn find_by_id(&self, store_idx: i64) -> Result<Option<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM store WHERE store_idx = ?")
            .bind(store_idx)
            .fetch_optional(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자가 가게를 찜했는지 여부
    pub async fn is_jjim_by(&self, store_idx: i64, user_idx: i64) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jjim WHERE store_idx = ? AND user_idx = ?)")
            .bind(store_idx)
            .bind(user_idx)
            .fetch_one(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_by_owner(&self, user_idx: i64) -> Result<Vec<Store>, AppError> {
        sqlx::query_as::<_, Store>("SELECT * FROM store WHERE user_idx = ? ORDER BY store_idx")
            .bind(user_idx)
            .fetch_all(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 가게 이름 부분 일치 검색
    ///
    /// `pattern`은 [`like_pattern`](crate::utils::string_utils::like_pattern)으로 만든 값이어야 합니다.
    /// 찜 수 정렬은 `jjim` 테이블 집계를 LEFT JOIN해서 계산합니다.
    pub async fn search(&self, pattern: &str, sort: StoreSort) -> Result<Vec<Store>, AppError> {
        let query = format!(
            "SELECT s.*, COALESCE(j.jjim_cnt, 0) AS jjim_cnt \
               FROM store AS s \
               LEFT JOIN (SELECT store_idx, COUNT(*) AS jjim_cnt FROM jjim GROUP BY store_idx) AS j \
                 ON j.store_idx = s.store_idx \
              WHERE UPPER(s.store_name) LIKE UPPER(?) ESCAPE '\\' AND s.status = 'ACTIVE' \
              ORDER BY {}",
            sort.order_by()
        );

        sqlx::query_as::<_, Store>(&query)
            .bind(pattern)
            .fetch_all(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 가게 정보 수정
    ///
    /// 소유자 조건을 UPDATE에 포함해 한 트랜잭션에서 처리합니다.
    /// 갱신되지 않았다면 가게가 없으면 `NotFound`, 다른 계정 소유면 `AuthorizationError`입니다.
    pub async fn update_info(&self, store_idx: i64, owner_idx: i64, req: &UpdateStoreRequest) -> Result<(), AppError> {
        let mut tx = self.sqlite.begin().await?;

        let updated = sqlx::query(
            "UPDATE store \
                SET store_name = ?, store_address = ?, store_description = ?, category = ?, store_image = ?, updated_at = ? \
              WHERE store_idx = ? AND user_idx = ? AND status = 'ACTIVE'",
        )
        .bind(&req.store_name)
        .bind(&req.store_address)
        .bind(&req.store_description)
        .bind(req.category)
        .bind(&req.store_image)
        .bind(Utc::now())
        .bind(store_idx)
        .bind(owner_idx)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .rows_affected();

        if updated != 1 {
            let owner: Option<(i64,)> = sqlx::query_as("SELECT user_idx FROM store WHERE store_idx = ? AND status = 'ACTIVE'")
                .bind(store_idx)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

            return Err(match owner {
                None => AppError::NotFound(format!("가게를 찾을 수 없습니다 (store_idx={})", store_idx)),
                Some(_) => AppError::AuthorizationError("본인 가게만 수정할 수 있습니다".to_string()),
            });
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 가게 상태 변경. 영향받은 행 수를 반환합니다.
    pub async fn update_status(&self, store_idx: i64, status: StoreStatus) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE store SET status = ?, updated_at = ? WHERE store_idx = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(store_idx)
            .execute(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::*;
    use crate::domain::entities::stores::StoreCategory;
    use crate::utils::string_utils::like_pattern;

    async fn setup() -> (Arc<Database>, StoreRepository) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let repo = StoreRepository::with_database(db.clone());
        (db, repo)
    }

    async fn add_jjim(db: &Database, user_idx: i64, store_idx: i64) {
        sqlx::query("INSERT INTO jjim (user_idx, store_idx) VALUES (?, ?)")
            .bind(user_idx)
            .bind(store_idx)
            .execute(db.pool())
            .await
            .unwrap();
    }

    fn update_request(name: &str) -> UpdateStoreRequest {
        UpdateStoreRequest {
            store_name: name.to_string(),
            store_address: "서울시 용산구".to_string(),
            store_description: Some("매일 새벽에 굽습니다".to_string()),
            category: StoreCategory::Bakery,
            store_image: None,
        }
    }

    #[actix_web::test]
    async fn test_inactive_stores_are_hidden() {
        let (db, repo) = setup().await;
        let (owner_idx, store_idx, _) = seed_store_with_neighbor(&db).await;
        let closed_idx = insert_store(&db, owner_idx, "문 닫은 가게").await;
        repo.update_status(closed_idx, StoreStatus::Inactive).await.unwrap();

        let stores = repo.find_active().await.unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].store_idx, store_idx);
        assert!(repo.find_active_by_id(closed_idx).await.unwrap().is_none());
        assert_eq!(repo.find_by_owner(owner_idx).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_search_sorts_by_name_and_jjim() {
        let (db, repo) = setup().await;
        let (owner_idx, bakery_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;
        let bread_idx = insert_store(&db, owner_idx, "빵굽는 마을").await;
        insert_store(&db, owner_idx, "커피 한 잔").await;
        let other_idx = insert_user(&db, "other@reborn.kr", "USER").await;
        add_jjim(&db, neighbor_idx, bread_idx).await;
        add_jjim(&db, other_idx, bread_idx).await;
        add_jjim(&db, neighbor_idx, bakery_idx).await;

        let by_jjim = repo.search(&like_pattern("마을"), StoreSort::Jjim).await.unwrap();
        assert_eq!(by_jjim.len(), 1);

        let by_jjim = repo.search(&like_pattern(""), StoreSort::Jjim).await.unwrap();
        let order: Vec<i64> = by_jjim.iter().map(|s| s.store_idx).collect();
        assert_eq!(order[0], bread_idx);
        assert_eq!(order[1], bakery_idx);

        let by_name = repo.search(&like_pattern("리본"), StoreSort::Name).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].store_idx, bakery_idx);
    }

    #[actix_web::test]
    async fn test_search_treats_wildcards_literally() {
        let (db, repo) = setup().await;
        let (owner_idx, _, _) = seed_store_with_neighbor(&db).await;
        insert_store(&db, owner_idx, "100% 수제").await;

        let result = repo.search(&like_pattern("%"), StoreSort::None).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].store_name, "100% 수제");
    }

    #[actix_web::test]
    async fn test_update_info_checks_owner_and_existence() {
        let (db, repo) = setup().await;
        let (owner_idx, store_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;

        repo.update_info(store_idx, owner_idx, &update_request("리본 제과")).await.unwrap();
        let store = repo.find_active_by_id(store_idx).await.unwrap().unwrap();
        assert_eq!(store.store_name, "리본 제과");
        assert_eq!(store.category, StoreCategory::Bakery);

        let forbidden = repo.update_info(store_idx, neighbor_idx, &update_request("가로채기")).await;
        assert!(matches!(forbidden, Err(AppError::AuthorizationError(_))));

        let missing = repo.update_info(9999, owner_idx, &update_request("없음")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let unchanged = repo.find_active_by_id(store_idx).await.unwrap().unwrap();
        assert_eq!(unchanged.store_name, "리본 제과");
    }
}
