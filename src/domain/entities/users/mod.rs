//! Users Entity Module
//!
//! 이웃(`USER`)과 가게 운영자(`STORE`) 계정은 같은 테이블에 저장되며
//! [`crate::config::UserType`]으로 구분됩니다.

pub mod user;

pub use user::{User, UserStatus};
