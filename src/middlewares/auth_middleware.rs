//! JWT 인증 미들웨어
//!
//! 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 가게 운영자 역할
pub const ROLE_STORE: &str = "store";

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role.to_string()))
    }

    /// 가게 운영자 전용 (`store` 역할)
    pub fn store_owner() -> Self {
        Self::required_with_role(ROLE_STORE)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use crate::config::UserType;
    use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
    use crate::services::auth::TokenService;

    async fn whoami(auth: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(auth.user_idx.to_string())
    }

    async fn maybe_whoami(user: OptionalUser) -> HttpResponse {
        match user.0 {
            Some(auth) => HttpResponse::Ok().body(auth.user_idx.to_string()),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    fn bearer(user_idx: i64, user_type: UserType) -> (&'static str, String) {
        let token = TokenService::instance()
            .generate_access_token(user_idx, user_type)
            .unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_required_rejects_missing_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_required_inserts_authenticated_user() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(bearer(42, UserType::User))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "42");
    }

    #[actix_web::test]
    async fn test_store_owner_rejects_neighbor_role() {
        let app = test::init_service(
            App::new().service(
                web::resource("/owner")
                    .wrap(AuthMiddleware::store_owner())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let neighbor = test::TestRequest::get()
            .uri("/owner")
            .insert_header(bearer(7, UserType::User))
            .to_request();
        assert_eq!(test::call_service(&app, neighbor).await.status(), StatusCode::FORBIDDEN);

        let owner = test::TestRequest::get()
            .uri("/owner")
            .insert_header(bearer(8, UserType::Store))
            .to_request();
        assert_eq!(test::call_service(&app, owner).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_optional_allows_anonymous_and_ignores_bad_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/maybe")
                    .wrap(AuthMiddleware::optional())
                    .route(web::get().to(maybe_whoami)),
            ),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/maybe").to_request();
        assert_eq!(test::call_and_read_body(&app, anonymous).await, "anonymous");

        let broken = test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        assert_eq!(test::call_and_read_body(&app, broken).await, "anonymous");
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted_as_access() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::required())
                    .route(web::get().to(whoami)),
            ),
        )
        .await;

        let pair = TokenService::instance().generate_token_pair(3, UserType::User).unwrap();
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
