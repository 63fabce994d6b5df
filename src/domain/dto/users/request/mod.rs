//! 사용자/인증 요청 DTO

pub mod create_user;
pub mod auth_request;
pub mod user_request;

pub use create_user::{CreateUserRequest, CreateUserStoreRequest};
pub use auth_request::{LoginRequest, RefreshTokenRequest};
pub use user_request::{EditPointRequest, ModifyUserInformRequest, PointAction};
