//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 한 곳에서 관리합니다.
//! `.env` 파일 로드는 `main.rs`에서 `PROFILE` 값에 따라 수행됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, 비밀번호 해싱, Rate Limiting
//! - [`auth_config`] - JWT 설정과 계정 종류
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{DatabaseConfig, JwtConfig, ServerConfig};
//!
//! let url = DatabaseConfig::url();
//! let bind = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
//! let expiration = JwtConfig::expiration_hours();
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
