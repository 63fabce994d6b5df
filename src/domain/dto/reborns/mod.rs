//! 리본 상품 및 교환 내역 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
