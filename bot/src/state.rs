use anyhow::Context;
use shared::{Config, RedisRateStore};
use std::sync::Arc;

use crate::services::rate_service::RateService;

pub type HandlerResult = Result<(), anyhow::Error>;

pub struct AppState {
    pub bot_token: String,
    pub store: Arc<RedisRateStore>,
    pub rate_service: Arc<RateService>,
}

impl AppState {
    pub async fn new() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;
        let bot_token = config
            .bot_token
            .clone()
            .context("TELEGRAM_API_TOKEN (or BOT_TOKEN) must be set")?;

        let store = Arc::new(RedisRateStore::connect(&config.redis_url).await?);
        tracing::info!("Connected to Redis successfully");

        let rate_service = Arc::new(RateService::new(store.clone()));

        Ok(AppState {
            bot_token,
            store,
            rate_service,
        })
    }

    /// Releases the store connection once no handler holds it any more.
    pub async fn close(self) {
        drop(self.rate_service);
        match Arc::try_unwrap(self.store) {
            Ok(store) => store.close().await,
            Err(_) => tracing::warn!("Redis connection still in use at shutdown"),
        }
    }
}
