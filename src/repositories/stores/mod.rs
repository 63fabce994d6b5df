//! 가게 데이터 액세스 계층

pub mod store_repo;

pub use store_repo::StoreRepository;
