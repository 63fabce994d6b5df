//! # User Management HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 설명 | 상태 코드 |
//! |--------|------|------|------|-----------|
//! | `POST` | `/api/v1/users` | - | 이웃 회원가입 | 201 |
//! | `POST` | `/api/v1/users/stores` | - | 가게 운영자 회원가입 (가게 함께 생성) | 201 |
//! | `PATCH` | `/api/v1/users/points` | 필수 | 포인트 적립/취소 | 200 |
//! | `PATCH` | `/api/v1/users/status` | 필수 | 회원 탈퇴 (비활성화) | 204 |
//! | `PATCH` | `/api/v1/users` | 필수 | 닉네임 변경 | 204 |
//! | `GET` | `/api/v1/me` | 필수 | 내 정보 | 200 |

use actix_web::{get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::{CreateUserRequest, CreateUserStoreRequest, EditPointRequest, ModifyUserInformRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::users::UserService;

#[post("")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.create_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[post("/stores")]
pub async fn create_user_store(
    payload: web::Json<CreateUserStoreRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.create_user_store(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[patch("/points", wrap = "AuthMiddleware::required()")]
pub async fn edit_user_point(
    auth: AuthenticatedUser,
    payload: web::Json<EditPointRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    let response = service.edit_user_point(&auth, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[patch("/status", wrap = "AuthMiddleware::required()")]
pub async fn modify_user_status(
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    service.modify_user_status(&auth).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[patch("", wrap = "AuthMiddleware::required()")]
pub async fn modify_user_inform(
    auth: AuthenticatedUser,
    payload: web::Json<ModifyUserInformRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserService::instance();
    service.modify_user_inform(&auth, payload.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 내 정보 조회 (`/api/v1/me` 스코프에서 인증 미들웨어 적용)
#[get("")]
pub async fn get_user(
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let user = service.get_user(auth.user_idx).await?;

    Ok(HttpResponse::Ok().json(user))
}
