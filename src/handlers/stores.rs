//! # Store HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `GET` | `/api/v1/stores` | - | 영업 중인 가게 목록 (최근 수정 순) |
//! | `GET` | `/api/v1/stores/search?keyword=&sort=` | - | 이름 검색 (`NONE`/`NAME`/`SCORE`/`JJIM`) |
//! | `GET` | `/api/v1/stores/{store_idx}` | 선택 | 가게 상세 (로그인 시 찜 여부 포함) |
//! | `GET` | `/api/v1/stores/{store_idx}/location` | - | 가게 위치 |
//! | `PATCH` | `/api/v1/stores/{store_idx}` | store | 가게 정보 수정 |
//! | `PATCH` | `/api/v1/stores/{store_idx}/status` | store | 가게 비활성화 |
//!
//! `/search`는 `/{store_idx}`보다 먼저 등록되어야 합니다.

use actix_web::{get, patch, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::stores::{SearchStoreQuery, UpdateStoreRequest};
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::middlewares::AuthMiddleware;
use crate::services::{stores::StoreService, users::UserService};

#[get("")]
pub async fn get_store_list() -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let stores = service.get_store_list().await?;

    Ok(HttpResponse::Ok().json(stores))
}

#[get("/search")]
pub async fn search_stores(
    query: web::Query<SearchStoreQuery>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let stores = service.search_stores(query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(stores))
}

#[get("/{store_idx}", wrap = "AuthMiddleware::optional()")]
pub async fn get_store_info(
    viewer: OptionalUser,
    store_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let store = service
        .get_store_info(store_idx.into_inner(), viewer.0.as_ref())
        .await?;

    Ok(HttpResponse::Ok().json(store))
}

#[get("/{store_idx}/location")]
pub async fn get_store_location(
    store_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = StoreService::instance();
    let location = service.get_store_location(store_idx.into_inner()).await?;

    Ok(HttpResponse::Ok().json(location))
}

#[patch("/{store_idx}", wrap = "AuthMiddleware::store_owner()")]
pub async fn update_store_info(
    auth: AuthenticatedUser,
    store_idx: web::Path<i64>,
    payload: web::Json<UpdateStoreRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = StoreService::instance();
    let store = service
        .update_store_info(&auth, store_idx.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(store))
}

#[patch("/{store_idx}/status", wrap = "AuthMiddleware::store_owner()")]
pub async fn modify_store_status(
    auth: AuthenticatedUser,
    store_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.modify_store_status(&auth, store_idx.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
