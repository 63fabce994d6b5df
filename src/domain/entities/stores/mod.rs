//! Stores Entity Module

pub mod store;

pub use store::{Store, StoreCategory, StoreStatus};
