//! # 리본 상품 서비스 구현
//!
//! 가게 운영자의 상품 관리와 이웃의 교환 흐름을 다룹니다.
//!
//! ```text
//! 이웃                      가게 운영자
//!  │ create_task ─────────▶ reborn_task (ACTIVE, 교환 코드 발급)
//!  │                        │
//!  │ inactive_reborn_task   │ post_history
//!  ▼                        ▼
//! reborn_task (INACTIVE)    reborn_task (COMPLETE) + product_cnt - 1
//! ```
//!
//! 재고 차감과 교환 완료의 원자성은 [`RebornRepository`]가 보장하고,
//! 이 서비스는 소유권 확인과 응답 변환만 수행합니다.

use std::sync::Arc;
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    core::errors::AppError,
    domain::{
        dto::reborns::{
            CreateRebornRequest, CreateRebornResponse, CreateRebornTaskResponse,
            InProgressRebornResponse, PatchRebornRequest, RebornHistoryDetailResponse,
            RebornHistoryResponse, RebornResponse, RebornTaskStatusResponse,
        },
        entities::{
            reborns::{Reborn, RebornStatus, RebornTaskStatus},
            stores::{Store, StoreStatus},
        },
        models::auth::AuthenticatedUser,
    },
    repositories::{reborns::RebornRepository, stores::StoreRepository},
};

/// 매장에서 확인하는 6자리 교환 코드 (100000-999999)
fn generate_exchange_code() -> i64 {
    (Uuid::new_v4().as_u128() % 900_000) as i64 + 100_000
}

#[service(name = "reborn")]
pub struct RebornService {
    reborn_repo: Arc<RebornRepository>,
    store_repo: Arc<StoreRepository>,
}

impl RebornService {
    /// 명시적으로 주입한 리포지토리로 인스턴스를 만듭니다. (테스트용)
    pub fn with_repositories(reborn_repo: Arc<RebornRepository>, store_repo: Arc<StoreRepository>) -> Self {
        Self { reborn_repo, store_repo }
    }

    /// 요청자가 가게 소유자인지 확인합니다.
    ///
    /// 가게 상태는 보지 않습니다. 비활성화된 가게도 남은 교환과 재고는 처리할 수 있습니다.
    async fn ensure_store_owner(&self, auth: &AuthenticatedUser, store_idx: i64) -> Result<Store, AppError> {
        let store = self.store_repo
            .find_by_id(store_idx)
            .await?
            .ok_or_else(|| AppError::NotFound("가게를 찾을 수 없습니다".to_string()))?;

        if !store.is_owned_by(auth.user_idx) {
            return Err(AppError::AuthorizationError("본인 가게의 상품만 관리할 수 있습니다".to_string()));
        }
        Ok(store)
    }

    /// 삭제되지 않은 상품을 찾고 소유자를 확인합니다.
    async fn find_owned_reborn(&self, auth: &AuthenticatedUser, reborn_idx: i64) -> Result<Reborn, AppError> {
        let reborn = self.reborn_repo
            .find_by_id(reborn_idx)
            .await?
            .filter(|reborn| reborn.status != RebornStatus::Delete)
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))?;

        self.ensure_store_owner(auth, reborn.store_idx).await?;
        Ok(reborn)
    }

    /// 상품 등록 (영업 중인 본인 가게만)
    pub async fn create_reborn(&self, auth: &AuthenticatedUser, request: CreateRebornRequest) -> Result<CreateRebornResponse, AppError> {
        let store = self.ensure_store_owner(auth, request.store_idx).await?;
        if store.status != StoreStatus::Active {
            return Err(AppError::NotFound("가게를 찾을 수 없습니다".to_string()));
        }

        let reborn_idx = self.reborn_repo.create(&request).await?;
        log::info!("리본 상품 등록: reborn_idx={}, store_idx={}, 수량 {}", reborn_idx, request.store_idx, request.product_cnt);

        Ok(CreateRebornResponse { reborn_idx })
    }

    /// 가게의 상품 목록 (삭제된 상품 제외)
    pub async fn get_reborns(&self, store_idx: i64) -> Result<Vec<RebornResponse>, AppError> {
        let reborns = self.reborn_repo.find_by_store(store_idx).await?;
        Ok(reborns.into_iter().map(RebornResponse::from).collect())
    }

    /// 점주가 소유한 가게들의 교환 대기 목록
    pub async fn get_in_progress_reborns(&self, auth: &AuthenticatedUser) -> Result<Vec<InProgressRebornResponse>, AppError> {
        self.reborn_repo.find_in_progress_by_owner(auth.user_idx).await
    }

    /// 상품 수정
    ///
    /// 수량이 0보다 크면 `ACTIVE`, 0이면 `INACTIVE`가 됩니다. 삭제된 상품은 `NotFound`.
    pub async fn patch_reborn(
        &self,
        auth: &AuthenticatedUser,
        reborn_idx: i64,
        request: PatchRebornRequest,
    ) -> Result<RebornResponse, AppError> {
        self.find_owned_reborn(auth, reborn_idx).await?;

        if self.reborn_repo.update(reborn_idx, &request).await? == 0 {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        self.reborn_repo
            .find_by_id(reborn_idx)
            .await?
            .map(RebornResponse::from)
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다".to_string()))
    }

    pub async fn delete_reborn(&self, auth: &AuthenticatedUser, reborn_idx: i64) -> Result<(), AppError> {
        self.find_owned_reborn(auth, reborn_idx).await?;

        if self.reborn_repo.soft_delete(reborn_idx).await? == 0 {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다".to_string()));
        }

        log::info!("리본 상품 삭제: reborn_idx={}", reborn_idx);
        Ok(())
    }

    /// 교환 신청
    ///
    /// 교환 가능한 상품이면 `ACTIVE` 태스크와 교환 코드를 발급합니다. 재고는 교환 완료 시 차감됩니다.
    pub async fn create_task(&self, auth: &AuthenticatedUser, reborn_idx: i64) -> Result<CreateRebornTaskResponse, AppError> {
        let product_exchange_code = generate_exchange_code();
        let reborn_task_idx = self.reborn_repo
            .create_task(reborn_idx, auth.user_idx, product_exchange_code)
            .await?;

        log::info!("교환 신청: task={}, reborn_idx={}, user_idx={}", reborn_task_idx, reborn_idx, auth.user_idx);

        Ok(CreateRebornTaskResponse {
            reborn_task_idx,
            product_exchange_code,
        })
    }

    /// 교환 신청 취소 (신청자 본인만)
    ///
    /// 이미 완료되었거나 취소된 태스크는 `PreconditionNotMet`입니다.
    pub async fn inactive_reborn_task(&self, auth: &AuthenticatedUser, reborn_task_idx: i64) -> Result<RebornTaskStatusResponse, AppError> {
        let task = self.reborn_repo
            .find_task(reborn_task_idx)
            .await?
            .ok_or_else(|| AppError::NotFound("교환 내역을 찾을 수 없습니다".to_string()))?;

        auth.ensure_self(task.user_idx)?;

        if self.reborn_repo.inactivate_task(reborn_task_idx).await? == 0 {
            return Err(AppError::PreconditionNotMet("대기 중인 교환만 취소할 수 있습니다".to_string()));
        }

        Ok(RebornTaskStatusResponse {
            reborn_task_idx,
            status: RebornTaskStatus::Inactive,
        })
    }

    pub async fn get_history(&self, auth: &AuthenticatedUser) -> Result<Vec<RebornHistoryResponse>, AppError> {
        self.reborn_repo.find_history_by_user(auth.user_idx).await
    }

    /// 교환 내역 상세 (신청자 본인만)
    pub async fn get_history_detail(&self, auth: &AuthenticatedUser, reborn_task_idx: i64) -> Result<RebornHistoryDetailResponse, AppError> {
        let task = self.reborn_repo
            .find_task(reborn_task_idx)
            .await?
            .ok_or_else(|| AppError::NotFound("교환 내역을 찾을 수 없습니다".to_string()))?;

        auth.ensure_self(task.user_idx)?;

        self.reborn_repo
            .find_history_detail(reborn_task_idx)
            .await?
            .ok_or_else(|| AppError::NotFound("교환 내역을 찾을 수 없습니다".to_string()))
    }

    /// 교환 완료 처리 (가게 운영자)
    ///
    /// 태스크가 존재하면 해당 상품 가게의 소유자인지 먼저 확인합니다.
    /// 존재하지 않는 태스크는 완료 처리 트랜잭션에서 `DatabaseError`로 보고됩니다.
    pub async fn post_history(&self, auth: &AuthenticatedUser, reborn_task_idx: i64) -> Result<RebornTaskStatusResponse, AppError> {
        if let Some(task) = self.reborn_repo.find_task(reborn_task_idx).await? {
            if let Some(reborn) = self.reborn_repo.find_by_id(task.reborn_idx).await? {
                self.ensure_store_owner(auth, reborn.store_idx).await?;
            }
        }

        match self.reborn_repo.complete_task(reborn_task_idx).await {
            Ok(()) => {
                log::info!("교환 완료: task={}", reborn_task_idx);
                Ok(RebornTaskStatusResponse {
                    reborn_task_idx,
                    status: RebornTaskStatus::Complete,
                })
            }
            Err(e) => {
                log::warn!("교환 완료 실패: task={} ({})", reborn_task_idx, e);
                Err(e)
            }
        }
    }

    /// 재고 한 개 차감 (가게 운영자)
    ///
    /// 상품이 존재하면 소유자를 확인한 뒤 조건부 차감을 수행합니다.
    /// 교환할 수 없는 상품은 `StockUnavailable`입니다.
    pub async fn decrease_product_cnt(&self, auth: &AuthenticatedUser, reborn_idx: i64) -> Result<RebornResponse, AppError> {
        if let Some(reborn) = self.reborn_repo.find_by_id(reborn_idx).await? {
            self.ensure_store_owner(auth, reborn.store_idx).await?;
        }

        self.reborn_repo.decrease_product_cnt(reborn_idx).await?;

        self.reborn_repo
            .find_by_id(reborn_idx)
            .await?
            .map(RebornResponse::from)
            .ok_or_else(|| AppError::InternalError(format!("차감된 상품을 다시 읽을 수 없습니다 (reborn_idx={})", reborn_idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserType;
    use crate::db::{fixtures::*, Database};

    async fn setup() -> (Arc<Database>, RebornService) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let service = RebornService::with_repositories(
            Arc::new(RebornRepository::with_database(db.clone())),
            Arc::new(StoreRepository::with_database(db.clone())),
        );
        (db, service)
    }

    fn auth(user_idx: i64, user_type: UserType) -> AuthenticatedUser {
        AuthenticatedUser {
            user_idx,
            user_type,
            roles: user_type.roles(),
        }
    }

    fn create_request(store_idx: i64, product_cnt: i64) -> CreateRebornRequest {
        CreateRebornRequest {
            store_idx,
            product_name: "바게트".to_string(),
            product_guide: "카운터에서 교환".to_string(),
            product_comment: "".to_string(),
            product_img: None,
            product_limit_time: "22:00".to_string(),
            product_cnt,
        }
    }

    #[test]
    fn test_exchange_code_has_six_digits() {
        for _ in 0..100 {
            let code = generate_exchange_code();
            assert!((100_000..=999_999).contains(&code));
        }
    }

    #[actix_web::test]
    async fn test_full_redemption_flow() {
        let (db, service) = setup().await;
        let (owner_idx, store_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;
        let owner = auth(owner_idx, UserType::Store);
        let neighbor = auth(neighbor_idx, UserType::User);

        let created = service.create_reborn(&owner, create_request(store_idx, 2)).await.unwrap();
        let task = service.create_task(&neighbor, created.reborn_idx).await.unwrap();
        assert_eq!(reborn_state(&db, created.reborn_idx).await, (2, "ACTIVE".to_string()));

        let in_progress = service.get_in_progress_reborns(&owner).await.unwrap();
        assert_eq!(in_progress.len(), 1);

        let completed = service.post_history(&owner, task.reborn_task_idx).await.unwrap();
        assert_eq!(completed.status, RebornTaskStatus::Complete);
        assert_eq!(reborn_state(&db, created.reborn_idx).await, (1, "ACTIVE".to_string()));

        let detail = service.get_history_detail(&neighbor, task.reborn_task_idx).await.unwrap();
        assert_eq!(detail.product_exchange_code, task.product_exchange_code);
        assert_eq!(detail.status, RebornTaskStatus::Complete);
        assert_eq!(service.get_history(&neighbor).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_only_owner_manages_listings() {
        let (db, service) = setup().await;
        let (owner_idx, store_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;
        let reborn_idx = insert_reborn(&db, store_idx, 3, "ACTIVE").await;
        let neighbor = auth(neighbor_idx, UserType::User);

        let create = service.create_reborn(&neighbor, create_request(store_idx, 1)).await;
        assert!(matches!(create, Err(AppError::AuthorizationError(_))));

        let decrease = service.decrease_product_cnt(&neighbor, reborn_idx).await;
        assert!(matches!(decrease, Err(AppError::AuthorizationError(_))));
        assert_eq!(reborn_state(&db, reborn_idx).await, (3, "ACTIVE".to_string()));

        let owner = auth(owner_idx, UserType::Store);
        let decreased = service.decrease_product_cnt(&owner, reborn_idx).await.unwrap();
        assert_eq!(decreased.product_cnt, 2);
        assert_eq!(decreased.status, RebornStatus::Active);
    }

    #[actix_web::test]
    async fn test_closed_store_still_settles_pending_exchanges() {
        let (db, service) = setup().await;
        let (owner_idx, store_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;
        let owner = auth(owner_idx, UserType::Store);
        let neighbor = auth(neighbor_idx, UserType::User);

        let created = service.create_reborn(&owner, create_request(store_idx, 3)).await.unwrap();
        let task = service.create_task(&neighbor, created.reborn_idx).await.unwrap();

        service.store_repo.update_status(store_idx, StoreStatus::Inactive).await.unwrap();

        let completed = service.post_history(&owner, task.reborn_task_idx).await.unwrap();
        assert_eq!(completed.status, RebornTaskStatus::Complete);

        let decreased = service.decrease_product_cnt(&owner, created.reborn_idx).await.unwrap();
        assert_eq!(decreased.product_cnt, 1);

        let stranger = auth(insert_user(&db, "stranger@reborn.kr", "STORE").await, UserType::Store);
        assert!(matches!(
            service.decrease_product_cnt(&stranger, created.reborn_idx).await,
            Err(AppError::AuthorizationError(_))
        ));

        assert!(matches!(
            service.create_reborn(&owner, create_request(store_idx, 1)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_decrease_on_missing_listing_is_unavailable() {
        let (db, service) = setup().await;
        let (owner_idx, _, _) = seed_store_with_neighbor(&db).await;

        let result = service.decrease_product_cnt(&auth(owner_idx, UserType::Store), 777).await;

        assert!(matches!(result, Err(AppError::StockUnavailable(_))));
    }

    #[actix_web::test]
    async fn test_patch_and_delete_listing() {
        let (db, service) = setup().await;
        let (owner_idx, store_idx, _) = seed_store_with_neighbor(&db).await;
        let owner = auth(owner_idx, UserType::Store);
        let reborn_idx = insert_reborn(&db, store_idx, 0, "INACTIVE").await;

        let patched = service
            .patch_reborn(
                &owner,
                reborn_idx,
                PatchRebornRequest {
                    product_name: "식빵".to_string(),
                    product_guide: "포장 완료".to_string(),
                    product_comment: "".to_string(),
                    product_img: None,
                    product_limit_time: "20:00".to_string(),
                    product_cnt: 4,
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.status, RebornStatus::Active);
        assert_eq!(patched.product_cnt, 4);

        service.delete_reborn(&owner, reborn_idx).await.unwrap();
        assert!(service.get_reborns(store_idx).await.unwrap().is_empty());
        assert!(matches!(service.delete_reborn(&owner, reborn_idx).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_cancel_task_then_complete_is_rejected() {
        let (db, service) = setup().await;
        let (owner_idx, store_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;
        let reborn_idx = insert_reborn(&db, store_idx, 1, "ACTIVE").await;
        let neighbor = auth(neighbor_idx, UserType::User);
        let task = service.create_task(&neighbor, reborn_idx).await.unwrap();

        let cancelled = service.inactive_reborn_task(&neighbor, task.reborn_task_idx).await.unwrap();
        assert_eq!(cancelled.status, RebornTaskStatus::Inactive);
        assert!(service.get_history(&neighbor).await.unwrap().is_empty());

        let again = service.inactive_reborn_task(&neighbor, task.reborn_task_idx).await;
        assert!(matches!(again, Err(AppError::PreconditionNotMet(_))));

        let complete = service.post_history(&auth(owner_idx, UserType::Store), task.reborn_task_idx).await;
        assert!(matches!(complete, Err(AppError::PreconditionNotMet(_))));
        assert_eq!(reborn_state(&db, reborn_idx).await, (1, "ACTIVE".to_string()));
    }

    #[actix_web::test]
    async fn test_history_detail_is_private() {
        let (db, service) = setup().await;
        let (owner_idx, store_idx, neighbor_idx) = seed_store_with_neighbor(&db).await;
        let reborn_idx = insert_reborn(&db, store_idx, 1, "ACTIVE").await;
        let task_idx = insert_task(&db, reborn_idx, neighbor_idx, "ACTIVE").await;

        let other = service.get_history_detail(&auth(owner_idx, UserType::Store), task_idx).await;
        assert!(matches!(other, Err(AppError::AuthorizationError(_))));

        let missing = service.get_history_detail(&auth(neighbor_idx, UserType::User), 31337).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_complete_missing_task_is_database_error() {
        let (db, service) = setup().await;
        let (owner_idx, _, _) = seed_store_with_neighbor(&db).await;

        let result = service.post_history(&auth(owner_idx, UserType::Store), 31337).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
