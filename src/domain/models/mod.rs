//! # Domain Models
//!
//! 영속되지 않는 도메인 모델입니다.
//!
//! - [`auth`] - 미들웨어가 요청 확장에 넣는 인증 사용자와 인증 모드/역할 요구사항
//! - [`token`] - JWT 클레임과 토큰 쌍

pub mod auth;
pub mod token;
