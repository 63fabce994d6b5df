//! 가게 조회/검색/수정 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
