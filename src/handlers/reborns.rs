//! # Reborn HTTP Handlers
//!
//! 가게 운영자(`store`)의 상품 관리와 이웃(`user`)의 교환 흐름을 처리합니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/api/v1/reborns` | store | 상품 등록 |
//! | `GET` | `/api/v1/reborns/stores/{store_idx}` | - | 가게 상품 목록 |
//! | `GET` | `/api/v1/reborns/in-progress` | store | 교환 대기 목록 |
//! | `PATCH` | `/api/v1/reborns/{reborn_idx}` | store | 상품 수정 |
//! | `DELETE` | `/api/v1/reborns/{reborn_idx}` | store | 상품 삭제 |
//! | `PATCH` | `/api/v1/reborns/{reborn_idx}/count` | store | 재고 한 개 차감 |
//! | `POST` | `/api/v1/reborns/{reborn_idx}/tasks` | 필수 | 교환 신청 |
//! | `PATCH` | `/api/v1/reborns/tasks/{task_idx}/inactive` | 필수 | 교환 신청 취소 |
//! | `GET` | `/api/v1/reborns/history` | 필수 | 내 교환 내역 |
//! | `GET` | `/api/v1/reborns/history/{task_idx}` | 필수 | 교환 내역 상세 |
//! | `POST` | `/api/v1/reborns/history/{task_idx}` | store | 교환 완료 처리 |
//!
//! 재고 부족은 `409 STOCK_UNAVAILABLE`, 교환 완료 조건 불충족은
//! `409 PRECONDITION_NOT_MET`으로 응답합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::reborns::{CreateRebornRequest, PatchRebornRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::reborns::RebornService;

#[post("", wrap = "AuthMiddleware::store_owner()")]
pub async fn create_reborn(
    auth: AuthenticatedUser,
    payload: web::Json<CreateRebornRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = RebornService::instance();
    let response = service.create_reborn(&auth, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("/stores/{store_idx}")]
pub async fn get_reborns(
    store_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let reborns = service.get_reborns(store_idx.into_inner()).await?;

    Ok(HttpResponse::Ok().json(reborns))
}

#[get("/in-progress", wrap = "AuthMiddleware::store_owner()")]
pub async fn get_in_progress_reborns(
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let tasks = service.get_in_progress_reborns(&auth).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

#[patch("/{reborn_idx}", wrap = "AuthMiddleware::store_owner()")]
pub async fn patch_reborn(
    auth: AuthenticatedUser,
    reborn_idx: web::Path<i64>,
    payload: web::Json<PatchRebornRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = RebornService::instance();
    let reborn = service
        .patch_reborn(&auth, reborn_idx.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(reborn))
}

#[delete("/{reborn_idx}", wrap = "AuthMiddleware::store_owner()")]
pub async fn delete_reborn(
    auth: AuthenticatedUser,
    reborn_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    service.delete_reborn(&auth, reborn_idx.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[patch("/{reborn_idx}/count", wrap = "AuthMiddleware::store_owner()")]
pub async fn decrease_product_cnt(
    auth: AuthenticatedUser,
    reborn_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let reborn = service.decrease_product_cnt(&auth, reborn_idx.into_inner()).await?;

    Ok(HttpResponse::Ok().json(reborn))
}

#[post("/{reborn_idx}/tasks", wrap = "AuthMiddleware::required()")]
pub async fn create_reborn_task(
    auth: AuthenticatedUser,
    reborn_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let task = service.create_task(&auth, reborn_idx.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

#[patch("/tasks/{task_idx}/inactive", wrap = "AuthMiddleware::required()")]
pub async fn inactive_reborn_task(
    auth: AuthenticatedUser,
    task_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let task = service.inactive_reborn_task(&auth, task_idx.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

#[get("/history", wrap = "AuthMiddleware::required()")]
pub async fn get_history(
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let history = service.get_history(&auth).await?;

    Ok(HttpResponse::Ok().json(history))
}

#[get("/history/{task_idx}", wrap = "AuthMiddleware::required()")]
pub async fn get_history_detail(
    auth: AuthenticatedUser,
    task_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let detail = service.get_history_detail(&auth, task_idx.into_inner()).await?;

    Ok(HttpResponse::Ok().json(detail))
}

/// 교환 완료 처리
///
/// 재고 차감과 태스크 완료가 한 트랜잭션으로 적용됩니다.
#[post("/history/{task_idx}", wrap = "AuthMiddleware::store_owner()")]
pub async fn post_history(
    auth: AuthenticatedUser,
    task_idx: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let service = RebornService::instance();
    let task = service.post_history(&auth, task_idx.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}
