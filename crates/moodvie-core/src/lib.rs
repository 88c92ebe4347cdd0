pub mod bundle;
pub mod collection;
pub mod config;
pub mod detail;
pub mod error;
pub mod messages;
pub mod models;
pub mod rating;
pub mod storage;
