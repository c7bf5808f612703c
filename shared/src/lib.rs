pub mod config;
pub mod error;
pub mod models;
pub mod redis;
pub mod store;

pub use config::Config;
pub use error::RateError;
pub use models::*;
pub use crate::redis::RedisRateStore;
pub use store::{MemoryRateStore, RateStore};
