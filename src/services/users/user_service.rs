//! # 사용자 관리 서비스 구현
//!
//! 이웃과 가게 운영자 계정의 생명주기를 관리합니다.
//!
//! ```text
//! UserService
//! ├── 가입      create_user, create_user_store (user + store 트랜잭션)
//! ├── 인증      login, refresh_tokens
//! ├── 포인트    edit_user_point (잔액 음수 불가)
//! └── 계정 관리 modify_user_status, modify_store_status, modify_user_inform, get_user
//!        │
//!        ▼
//! UserRepository / StoreRepository / TokenService
//! ```
//!
//! 비밀번호는 bcrypt로 해싱하며, cost는 [`PasswordConfig::bcrypt_cost`]가 실행 환경에 맞춰 결정합니다.

use std::sync::Arc;
use bcrypt::{hash, verify};
use singleton_macro::service;
use crate::{
    config::{PasswordConfig, UserType},
    core::errors::{AppError, ErrorContext},
    domain::{
        dto::users::{
            CreateUserRequest, CreateUserResponse, CreateUserStoreRequest, CreateUserStoreResponse,
            EditPointRequest, LoginRequest, LoginResponse, ModifyUserInformRequest, PointResponse,
            UserResponse,
        },
        entities::{stores::StoreStatus, users::UserStatus},
        models::auth::AuthenticatedUser,
        models::token::TokenPair,
    },
    repositories::{stores::StoreRepository, users::UserRepository},
    services::auth::TokenService,
};

const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    store_repo: Arc<StoreRepository>,
    token_service: Arc<TokenService>,
}

impl UserService {
    /// 명시적으로 주입한 의존성으로 인스턴스를 만듭니다. (테스트용)
    pub fn with_dependencies(
        user_repo: Arc<UserRepository>,
        store_repo: Arc<StoreRepository>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self { user_repo, store_repo, token_service }
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, PasswordConfig::bcrypt_cost())
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }

    /// 이웃 회원가입
    ///
    /// 이메일이 이미 사용 중이면 `ConflictError`를 반환합니다.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let start_time = std::time::Instant::now();

        let password_hash = self.hash_password(&request.user_pwd)?;
        let user_idx = self.user_repo.create(&request, &password_hash, UserType::User).await?;
        let jwt = self.token_service.generate_access_token(user_idx, UserType::User)?;

        log::info!("회원가입 완료: user_idx={} ({:?})", user_idx, start_time.elapsed());

        Ok(CreateUserResponse {
            user_idx,
            user_nickname: request.user_nickname,
            jwt,
        })
    }

    /// 가게 운영자 회원가입
    ///
    /// `STORE` 타입 계정과 가게를 한 트랜잭션으로 생성합니다.
    pub async fn create_user_store(&self, request: CreateUserStoreRequest) -> Result<CreateUserStoreResponse, AppError> {
        let password_hash = self.hash_password(&request.user.user_pwd)?;
        let (user_idx, store_idx) = self.user_repo.create_with_store(&request, &password_hash).await?;
        let jwt = self.token_service.generate_access_token(user_idx, UserType::Store)?;

        log::info!("가게 운영자 가입 완료: user_idx={}, store_idx={}", user_idx, store_idx);

        Ok(CreateUserStoreResponse {
            store_idx,
            user_idx,
            store_name: request.store_name,
            jwt,
        })
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 계정이 없거나 비밀번호가 틀리면 같은 메시지의 `AuthenticationError`를 반환합니다.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self.user_repo
            .find_by_email(&request.user_email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        let verify_start = std::time::Instant::now();
        let is_valid = verify(&request.user_pwd, &user.user_pwd)
            .with_context(|| format!("비밀번호 검증 실패 (user_idx={})", user.user_idx))?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::warn!("로그인 실패: {}", request.user_email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active() {
            return Err(AppError::AuthenticationError("탈퇴한 계정입니다".to_string()));
        }

        let tokens = self.token_service.generate_token_pair(user.user_idx, user.user_type)?;
        Ok(LoginResponse::new(user, tokens))
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다.
    ///
    /// 계정 종류는 토큰이 아니라 현재 저장된 값을 사용합니다.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.token_service.verify_refresh_token(refresh_token)?;
        let auth = self.token_service.to_authenticated_user(claims)?;

        let user = self.user_repo
            .find_by_id(auth.user_idx)
            .await?
            .filter(|user| user.is_active())
            .ok_or_else(|| AppError::AuthenticationError("사용할 수 없는 계정입니다".to_string()))?;

        self.token_service.generate_token_pair(user.user_idx, user.user_type)
    }

    pub async fn get_user(&self, user_idx: i64) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_idx)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 포인트 적립/취소
    ///
    /// 취소로 잔액이 음수가 되면 `ConflictError`이며 잔액은 바뀌지 않습니다.
    pub async fn edit_user_point(&self, auth: &AuthenticatedUser, request: EditPointRequest) -> Result<PointResponse, AppError> {
        let user_point = self.user_repo.add_point(auth.user_idx, request.delta()).await?;

        log::info!("포인트 변경: user_idx={}, {:?} {} → 잔액 {}", auth.user_idx, request.action, request.point, user_point);

        Ok(PointResponse {
            user_idx: auth.user_idx,
            user_point,
        })
    }

    /// 회원 탈퇴 (계정을 `INACTIVE`로 전환)
    pub async fn modify_user_status(&self, auth: &AuthenticatedUser) -> Result<(), AppError> {
        let updated = self.user_repo.update_status(auth.user_idx, UserStatus::Inactive).await?;

        if updated == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        log::info!("회원 탈퇴: user_idx={}", auth.user_idx);
        Ok(())
    }

    /// 가게 폐업 처리 (가게를 `INACTIVE`로 전환)
    ///
    /// 가게 소유자만 요청할 수 있습니다.
    pub async fn modify_store_status(&self, auth: &AuthenticatedUser, store_idx: i64) -> Result<(), AppError> {
        let store = self.store_repo
            .find_by_id(store_idx)
            .await?
            .ok_or_else(|| AppError::NotFound("가게를 찾을 수 없습니다".to_string()))?;

        auth.ensure_self(store.user_idx)?;

        let updated = self.store_repo.update_status(store_idx, StoreStatus::Inactive).await?;
        if updated == 0 {
            return Err(AppError::NotFound("가게를 찾을 수 없습니다".to_string()));
        }

        log::info!("가게 비활성화: store_idx={}", store_idx);
        Ok(())
    }

    /// 닉네임 변경
    pub async fn modify_user_inform(&self, auth: &AuthenticatedUser, request: ModifyUserInformRequest) -> Result<(), AppError> {
        let updated = self.user_repo.update_nickname(auth.user_idx, request.user_nickname.trim()).await?;

        if updated == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::domain::dto::users::PointAction;
    use crate::domain::entities::stores::StoreCategory;

    async fn setup() -> UserService {
        let db = Arc::new(Database::in_memory().await.unwrap());
        UserService::with_dependencies(
            Arc::new(UserRepository::with_database(db.clone())),
            Arc::new(StoreRepository::with_database(db)),
            Arc::new(TokenService {}),
        )
    }

    fn signup(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            user_email: email.to_string(),
            user_pwd: "reborn1234".to_string(),
            user_nickname: "빵순이".to_string(),
            user_name: "홍길동".to_string(),
            user_phone: "010-1234-5678".to_string(),
        }
    }

    fn auth(user_idx: i64, user_type: UserType) -> AuthenticatedUser {
        AuthenticatedUser {
            user_idx,
            user_type,
            roles: user_type.roles(),
        }
    }

    #[actix_web::test]
    async fn test_signup_then_login() {
        let service = setup().await;

        let created = service.create_user(signup("neighbor@reborn.kr")).await.unwrap();
        assert_eq!(created.user_nickname, "빵순이");
        let claims = service.token_service.verify_access_token(&created.jwt).unwrap();
        assert_eq!(claims.sub, created.user_idx.to_string());

        let login = service
            .login(LoginRequest {
                user_email: "neighbor@reborn.kr".to_string(),
                user_pwd: "reborn1234".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(login.user.user_idx, created.user_idx);
        assert_eq!(login.token_type, "Bearer");

        let refreshed = service.refresh_tokens(&login.refresh_token).await.unwrap();
        assert!(service.token_service.verify_access_token(&refreshed.access_token).is_ok());
    }

    #[actix_web::test]
    async fn test_login_rejects_wrong_password_and_withdrawn_account() {
        let service = setup().await;
        let created = service.create_user(signup("gone@reborn.kr")).await.unwrap();

        let wrong = service
            .login(LoginRequest {
                user_email: "gone@reborn.kr".to_string(),
                user_pwd: "wrong1234".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(AppError::AuthenticationError(_))));

        service.modify_user_status(&auth(created.user_idx, UserType::User)).await.unwrap();
        let withdrawn = service
            .login(LoginRequest {
                user_email: "gone@reborn.kr".to_string(),
                user_pwd: "reborn1234".to_string(),
            })
            .await;
        assert!(matches!(withdrawn, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_login_with_corrupt_hash_is_internal_error() {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let service = UserService::with_dependencies(
            Arc::new(UserRepository::with_database(db.clone())),
            Arc::new(StoreRepository::with_database(db.clone())),
            Arc::new(TokenService {}),
        );
        let user_idx = crate::db::fixtures::insert_user(&db, "broken@reborn.kr", "USER").await;

        let result = service
            .login(LoginRequest {
                user_email: "broken@reborn.kr".to_string(),
                user_pwd: "reborn1234".to_string(),
            })
            .await;

        match result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.starts_with(&format!("비밀번호 검증 실패 (user_idx={})", user_idx)));
            }
            other => panic!("expected InternalError, got {:?}", other.err()),
        }
    }

    #[actix_web::test]
    async fn test_store_owner_signup_and_close_store() {
        let service = setup().await;
        let created = service
            .create_user_store(CreateUserStoreRequest {
                user: signup("owner@reborn.kr"),
                store_name: "리본 베이커리".to_string(),
                store_address: "서울시 마포구".to_string(),
                store_description: None,
                category: StoreCategory::Bakery,
            })
            .await
            .unwrap();
        assert_eq!(created.store_name, "리본 베이커리");

        let stranger = service.create_user(signup("stranger@reborn.kr")).await.unwrap();
        let forbidden = service
            .modify_store_status(&auth(stranger.user_idx, UserType::User), created.store_idx)
            .await;
        assert!(matches!(forbidden, Err(AppError::AuthorizationError(_))));

        service
            .modify_store_status(&auth(created.user_idx, UserType::Store), created.store_idx)
            .await
            .unwrap();

        let missing = service.modify_store_status(&auth(created.user_idx, UserType::Store), 9999).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_point_save_and_cancel() {
        let service = setup().await;
        let created = service.create_user(signup("point@reborn.kr")).await.unwrap();
        let me = auth(created.user_idx, UserType::User);

        let saved = service
            .edit_user_point(&me, EditPointRequest { action: PointAction::Save, point: 1000 })
            .await
            .unwrap();
        assert_eq!(saved.user_point, 1000);

        let over = service
            .edit_user_point(&me, EditPointRequest { action: PointAction::Cancel, point: 1500 })
            .await;
        assert!(matches!(over, Err(AppError::ConflictError(_))));

        let cancelled = service
            .edit_user_point(&me, EditPointRequest { action: PointAction::Cancel, point: 400 })
            .await
            .unwrap();
        assert_eq!(cancelled.user_point, 600);
    }

    #[actix_web::test]
    async fn test_modify_nickname() {
        let service = setup().await;
        let created = service.create_user(signup("nick@reborn.kr")).await.unwrap();
        let me = auth(created.user_idx, UserType::User);

        service
            .modify_user_inform(&me, ModifyUserInformRequest { user_nickname: " 새닉네임 ".to_string() })
            .await
            .unwrap();

        let user = service.get_user(created.user_idx).await.unwrap();
        assert_eq!(user.user_nickname, "새닉네임");
        assert!(matches!(service.get_user(9999).await, Err(AppError::NotFound(_))));
    }
}
