//! # Authentication HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/v1/auth/login` | 이메일/비밀번호 로그인 |
//! | `POST` | `/api/v1/auth/refresh` | 리프레시 토큰으로 토큰 쌍 재발급 |
//! | `POST` | `/api/v1/auth/verify` | 액세스 토큰 검증 |

use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::{LoginRequest, RefreshTokenRequest};
use crate::services::{auth::TokenService, users::UserService};

#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let response = user_service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/refresh")]
pub async fn refresh_tokens(
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user_service = UserService::instance();
    let token_pair = user_service.refresh_tokens(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(json!({
        "access_token": token_pair.access_token,
        "refresh_token": token_pair.refresh_token,
        "expires_in": token_pair.expires_in,
        "token_type": "Bearer"
    })))
}

/// 액세스 토큰 검증
///
/// 미들웨어를 거치지 않고 헤더를 직접 읽어, 유효하면 토큰의 사용자 정보를 돌려줍니다.
#[post("/verify")]
pub async fn verify_token(
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_access_token(token)?;
    let user = token_service.to_authenticated_user(claims)?;

    Ok(HttpResponse::Ok().json(json!({
        "valid": true,
        "user_idx": user.user_idx,
        "user_type": user.user_type,
        "roles": user.roles
    })))
}
