//! 사용자 서비스
//!
//! 회원가입, 로그인, 포인트, 계정/가게 상태 변경을 담당하는 [`UserService`]를 제공합니다.

pub mod user_service;

pub use user_service::UserService;
