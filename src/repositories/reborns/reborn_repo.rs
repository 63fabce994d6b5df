//! # 리본 상품 리포지토리
//!
//! `reborn`, `reborn_task` 테이블에 대한 데이터 액세스를 담당합니다.
//!
//! ## 재고 규칙
//!
//! 남은 수량(`product_cnt`)의 감소는 항상 하나의 조건부 UPDATE로 수행됩니다.
//!
//! ```sql
//! UPDATE reborn
//!    SET product_cnt = product_cnt - 1,
//!        status = CASE WHEN product_cnt - 1 = 0 THEN 'INACTIVE' ELSE 'ACTIVE' END
//!  WHERE reborn_idx = ? AND status = 'ACTIVE' AND product_cnt > 0
//! ```
//!
//! 조건 검사와 쓰기가 한 문장 안에서 원자적으로 평가되므로, 동시에 여러 요청이 들어와도
//! 수량은 음수가 되지 않고 `ACTIVE ⇒ product_cnt > 0` 관계가 유지됩니다.
//! 영향받은 행이 없으면 재고가 없거나 교환할 수 없는 상태입니다.

use std::sync::Arc;
use chrono::Utc;
use singleton_macro::repository;
use crate::{
    core::errors::AppError,
    db::Database,
    domain::dto::reborns::{
        CreateRebornRequest, InProgressRebornResponse, PatchRebornRequest,
        RebornHistoryDetailResponse, RebornHistoryResponse,
    },
    domain::entities::reborns::{Reborn, RebornStatus, RebornTask},
};

const DECREASE_PRODUCT_CNT: &str = "\
    UPDATE reborn \
       SET product_cnt = product_cnt - 1, \
           status = CASE WHEN product_cnt - 1 = 0 THEN 'INACTIVE' ELSE 'ACTIVE' END, \
           updated_at = ? \
     WHERE reborn_idx = ? AND status = 'ACTIVE' AND product_cnt > 0";

/// 교환 태스크가 가리키는 상품을 같은 조건으로 한 개 차감합니다.
const DECREASE_PRODUCT_CNT_FOR_TASK: &str = "\
    UPDATE reborn \
       SET product_cnt = product_cnt - 1, \
           status = CASE WHEN product_cnt - 1 = 0 THEN 'INACTIVE' ELSE 'ACTIVE' END, \
           updated_at = ? \
     WHERE reborn_idx = (SELECT reborn_idx FROM reborn_task WHERE reborn_task_idx = ? AND status = 'ACTIVE') \
       AND status = 'ACTIVE' AND product_cnt > 0";

/// 리본 상품 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// - **StockUnavailable**: 재고 차감 조건(ACTIVE, 수량 > 0)을 만족하지 않음
/// - **PreconditionNotMet**: 교환 완료 조건을 만족하지 않아 트랜잭션을 롤백함
/// - **DatabaseError**: 드라이버 오류, 교환 완료 처리 중 태스크/상품 조회 실패
#[repository(name = "reborn", collection = "reborn")]
pub struct RebornRepository {
    sqlite: Arc<Database>,
}

impl RebornRepository {
    /// 주어진 데이터베이스를 사용하는 인스턴스를 만듭니다. (테스트용)
    pub fn with_database(sqlite: Arc<Database>) -> Self {
        Self { sqlite }
    }

    /// 새 상품을 `ACTIVE` 상태로 등록하고 ID를 반환합니다.
    pub async fn create(&self, req: &CreateRebornRequest) -> Result<i64, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO reborn (store_idx, product_name, product_guide, product_comment, product_img, \
             product_limit_time, product_cnt, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(req.store_idx)
        .bind(&req.product_name)
        .bind(&req.product_guide)
        .bind(&req.product_comment)
        .bind(&req.product_img)
        .bind(&req.product_limit_time)
        .bind(req.product_cnt)
        .bind(RebornStatus::Active)
        .bind(now)
        .bind(now)
        .execute(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, reborn_idx: i64) -> Result<Option<Reborn>, AppError> {
        sqlx::query_as::<_, Reborn>("SELECT * FROM reborn WHERE reborn_idx = ?")
            .bind(reborn_idx)
            .fetch_optional(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 가게의 상품 목록 (삭제된 상품 제외)
    pub async fn find_by_store(&self, store_idx: i64) -> Result<Vec<Reborn>, AppError> {
        sqlx::query_as::<_, Reborn>(
            "SELECT * FROM reborn WHERE store_idx = ? AND status != 'DELETE' ORDER BY reborn_idx DESC",
        )
        .bind(store_idx)
        .fetch_all(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 점주 계정이 소유한 가게들의 교환 대기 목록
    pub async fn find_in_progress_by_owner(&self, user_idx: i64) -> Result<Vec<InProgressRebornResponse>, AppError> {
        sqlx::query_as::<_, InProgressRebornResponse>(
            "SELECT t.reborn_task_idx, t.reborn_idx, s.store_idx, s.store_name, s.category, \
                    r.product_name, r.product_img, r.product_limit_time, r.product_cnt \
               FROM reborn_task AS t \
               JOIN reborn AS r ON r.reborn_idx = t.reborn_idx \
               JOIN store AS s ON s.store_idx = r.store_idx \
              WHERE s.user_idx = ? AND t.status = 'ACTIVE' \
              ORDER BY t.reborn_task_idx",
        )
        .bind(user_idx)
        .fetch_all(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 상품 정보를 수정하고 영향받은 행 수를 반환합니다.
    ///
    /// 상태는 새 수량에서 결정됩니다. 삭제된 상품은 수정되지 않습니다.
    pub async fn update(&self, reborn_idx: i64, req: &PatchRebornRequest) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reborn \
                SET product_name = ?, product_guide = ?, product_comment = ?, product_img = ?, \
                    product_limit_time = ?, product_cnt = ?, status = ?, updated_at = ? \
              WHERE reborn_idx = ? AND status != 'DELETE'",
        )
        .bind(&req.product_name)
        .bind(&req.product_guide)
        .bind(&req.product_comment)
        .bind(&req.product_img)
        .bind(&req.product_limit_time)
        .bind(req.product_cnt)
        .bind(RebornStatus::for_remaining(req.product_cnt))
        .bind(Utc::now())
        .bind(reborn_idx)
        .execute(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// 상품을 삭제 상태로 바꿉니다. (soft delete)
    pub async fn soft_delete(&self, reborn_idx: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reborn SET status = 'DELETE', updated_at = ? WHERE reborn_idx = ? AND status != 'DELETE'",
        )
        .bind(Utc::now())
        .bind(reborn_idx)
        .execute(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// 재고 한 개 차감
    ///
    /// 상품이 `ACTIVE`이고 수량이 남아 있을 때만 한 개를 줄이며, 마지막 한 개였다면
    /// 같은 문장에서 `INACTIVE`로 전환합니다. 별도의 선행 조회는 하지 않습니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(())` - 정확히 한 행이 차감됨
    /// * `Err(AppError::StockUnavailable)` - 품절, 비활성, 삭제되었거나 존재하지 않는 상품
    /// * `Err(AppError::DatabaseError)` - 드라이버 오류
    pub async fn decrease_product_cnt(&self, reborn_idx: i64) -> Result<(), AppError> {
        let result = sqlx::query(DECREASE_PRODUCT_CNT)
            .bind(Utc::now())
            .bind(reborn_idx)
            .execute(self.sqlite.pool())
            .await
            .map_err(|e| {
                log::error!("재고 차감 실패 (reborn_idx={}): {}", reborn_idx, e);
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() != 1 {
            return Err(AppError::StockUnavailable(format!(
                "교환 가능한 재고가 없습니다 (reborn_idx={})",
                reborn_idx
            )));
        }

        Ok(())
    }

    /// 교환 완료 처리
    ///
    /// 하나의 트랜잭션 안에서 다음을 수행합니다.
    ///
    /// 1. 태스크가 가리키는 상품을 조건부로 한 개 차감 (태스크 `ACTIVE`, 상품 `ACTIVE`, 수량 > 0)
    /// 2. 차감되지 않았다면 태스크와 상품을 조회해 원인을 구분
    ///    - 태스크나 상품이 없음 → `DatabaseError`
    ///    - 조건 불충족 → `PreconditionNotMet`
    /// 3. 태스크를 `ACTIVE`에서 `COMPLETE`로 전환
    /// 4. 커밋
    ///
    /// 첫 문장이 쓰기이므로 SQLite 쓰기 잠금을 트랜잭션 시작 시점에 확보합니다.
    /// 실패 경로에서는 커밋 없이 반환하며, drop된 트랜잭션은 롤백됩니다.
    pub async fn complete_task(&self, reborn_task_idx: i64) -> Result<(), AppError> {
        let now = Utc::now();
        let mut tx = self.sqlite.begin().await?;

        let decreased = sqlx::query(DECREASE_PRODUCT_CNT_FOR_TASK)
            .bind(now)
            .bind(reborn_task_idx)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("교환 완료 처리 중 재고 차감 실패 (task={}): {}", reborn_task_idx, e);
                AppError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if decreased != 1 {
            let listing: Option<(i64,)> = sqlx::query_as(
                "SELECT r.reborn_idx FROM reborn_task AS t \
                   JOIN reborn AS r ON r.reborn_idx = t.reborn_idx \
                  WHERE t.reborn_task_idx = ?",
            )
            .bind(reborn_task_idx)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

            return Err(match listing {
                None => AppError::DatabaseError(format!(
                    "교환 태스크 또는 상품을 찾을 수 없습니다 (task={})",
                    reborn_task_idx
                )),
                Some(_) => AppError::PreconditionNotMet(format!(
                    "교환을 완료할 수 없는 상태입니다 (task={})",
                    reborn_task_idx
                )),
            });
        }

        let completed = sqlx::query(
            "UPDATE reborn_task SET status = 'COMPLETE', updated_at = ? \
              WHERE reborn_task_idx = ? AND status = 'ACTIVE'",
        )
        .bind(now)
        .bind(reborn_task_idx)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .rows_affected();

        if completed != 1 {
            return Err(AppError::PreconditionNotMet(format!(
                "교환 태스크가 이미 처리되었습니다 (task={})",
                reborn_task_idx
            )));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 교환 가능한 상품에 대해 `ACTIVE` 태스크를 만들고 ID를 반환합니다.
    ///
    /// 재고는 이 시점에 차감되지 않습니다. 조건을 만족하지 않으면 `StockUnavailable`.
    pub async fn create_task(&self, reborn_idx: i64, user_idx: i64, product_exchange_code: i64) -> Result<i64, AppError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO reborn_task (reborn_idx, user_idx, product_exchange_code, status, created_at, updated_at) \
             SELECT reborn_idx, ?, ?, 'ACTIVE', ?, ? FROM reborn \
              WHERE reborn_idx = ? AND status = 'ACTIVE' AND product_cnt > 0",
        )
        .bind(user_idx)
        .bind(product_exchange_code)
        .bind(now)
        .bind(now)
        .bind(reborn_idx)
        .execute(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.rows_affected() != 1 {
            return Err(AppError::StockUnavailable(format!(
                "교환 가능한 재고가 없습니다 (reborn_idx={})",
                reborn_idx
            )));
        }

        Ok(result.last_insert_rowid())
    }

    pub async fn find_task(&self, reborn_task_idx: i64) -> Result<Option<RebornTask>, AppError> {
        sqlx::query_as::<_, RebornTask>("SELECT * FROM reborn_task WHERE reborn_task_idx = ?")
            .bind(reborn_task_idx)
            .fetch_optional(self.sqlite.pool())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 대기 중인 태스크를 취소합니다.
    pub async fn inactivate_task(&self, reborn_task_idx: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reborn_task SET status = 'INACTIVE', updated_at = ? \
              WHERE reborn_task_idx = ? AND status = 'ACTIVE'",
        )
        .bind(Utc::now())
        .bind(reborn_task_idx)
        .execute(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// 이웃의 교환 내역 (취소된 태스크 제외)
    pub async fn find_history_by_user(&self, user_idx: i64) -> Result<Vec<RebornHistoryResponse>, AppError> {
        sqlx::query_as::<_, RebornHistoryResponse>(
            "SELECT t.reborn_task_idx, s.store_name, s.store_score, s.store_address, t.status, t.created_at \
               FROM reborn_task AS t \
               JOIN reborn AS r ON r.reborn_idx = t.reborn_idx \
               JOIN store AS s ON s.store_idx = r.store_idx \
              WHERE t.user_idx = ? AND t.status != 'INACTIVE' \
              ORDER BY t.reborn_task_idx DESC",
        )
        .bind(user_idx)
        .fetch_all(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    pub async fn find_history_detail(&self, reborn_task_idx: i64) -> Result<Option<RebornHistoryDetailResponse>, AppError> {
        sqlx::query_as::<_, RebornHistoryDetailResponse>(
            "SELECT t.reborn_task_idx, r.product_name, r.product_guide, r.product_comment, \
                    s.store_name, s.store_score, s.store_address, \
                    t.product_exchange_code, t.status, t.created_at \
               FROM reborn_task AS t \
               JOIN reborn AS r ON r.reborn_idx = t.reborn_idx \
               JOIN store AS s ON s.store_idx = r.store_idx \
              WHERE t.reborn_task_idx = ?",
        )
        .bind(reborn_task_idx)
        .fetch_optional(self.sqlite.pool())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
