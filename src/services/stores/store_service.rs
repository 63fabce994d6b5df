//! 가게 조회/검색/수정 서비스

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::stores::{SearchStoreQuery, StoreDetailResponse, StoreLocationResponse, StoreResponse, UpdateStoreRequest},
    domain::models::auth::AuthenticatedUser,
    repositories::stores::StoreRepository,
    utils::string_utils::{like_pattern, validate_required_string},
};

#[service(name = "store")]
pub struct StoreService {
    store_repo: Arc<StoreRepository>,
}

impl StoreService {
    /// 명시적으로 주입한 리포지토리로 인스턴스를 만듭니다. (테스트용)
    pub fn with_repository(store_repo: Arc<StoreRepository>) -> Self {
        Self { store_repo }
    }

    pub async fn get_store_list(&self) -> Result<Vec<StoreResponse>, AppError> {
        let stores = self.store_repo.find_active().await?;
        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }

    async fn find_active_store(&self, store_idx: i64) -> Result<StoreResponse, AppError> {
        self.store_repo
            .find_active_by_id(store_idx)
            .await?
            .map(StoreResponse::from)
            .ok_or_else(|| AppError::NotFound("가게를 찾을 수 없습니다".to_string()))
    }

    /// 가게 상세 조회
    ///
    /// `viewer`가 있으면 그 사용자의 찜 여부를 함께 돌려줍니다.
    pub async fn get_store_info(
        &self,
        store_idx: i64,
        viewer: Option<&AuthenticatedUser>,
    ) -> Result<StoreDetailResponse, AppError> {
        let store = self.find_active_store(store_idx).await?;
        let is_jjim = match viewer {
            Some(user) => self.store_repo.is_jjim_by(store_idx, user.user_idx).await?,
            None => false,
        };

        Ok(StoreDetailResponse { store, is_jjim })
    }

    pub async fn get_store_location(&self, store_idx: i64) -> Result<StoreLocationResponse, AppError> {
        self.store_repo
            .find_active_by_id(store_idx)
            .await?
            .map(StoreLocationResponse::from)
            .ok_or_else(|| AppError::NotFound("가게를 찾을 수 없습니다".to_string()))
    }

    /// 가게 이름 검색
    ///
    /// 빈 검색어는 `ValidationError`입니다. `%`, `_`는 문자 그대로 검색됩니다.
    pub async fn search_stores(&self, query: SearchStoreQuery) -> Result<Vec<StoreResponse>, AppError> {
        let keyword = validate_required_string(&query.keyword, "검색어")?;

        let stores = self.store_repo.search(&like_pattern(&keyword), query.sort).await?;
        log::debug!("가게 검색: '{}' ({:?}) → {}건", keyword, query.sort, stores.len());

        Ok(stores.into_iter().map(StoreResponse::from).collect())
    }

    /// 가게 정보 수정 (소유자만)
    pub async fn update_store_info(
        &self,
        auth: &AuthenticatedUser,
        store_idx: i64,
        request: UpdateStoreRequest,
    ) -> Result<StoreResponse, AppError> {
        self.store_repo.update_info(store_idx, auth.user_idx, &request).await?;
        log::info!("가게 정보 수정: store_idx={}", store_idx);
        self.find_active_store(store_idx).await
    }
}
