use anyhow::Result;
use shared::{Config, RedisRateStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod services;

use services::feed_fetcher::HttpFeedFetcher;
use services::rate_updater::RateUpdater;
use services::scheduler::{DailySchedule, Scheduler};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting rates updater...");

    let config = Config::from_env()?;
    let store = Arc::new(RedisRateStore::connect(&config.redis_url).await?);
    tracing::info!("Connected to Redis");

    let fetcher = HttpFeedFetcher::new(&config.feed_url, config.feed_timeout)?;
    let updater = RateUpdater::new(Arc::new(fetcher), store.clone())
        .with_reference_currency(config.reference_currency.clone());

    // Eager run so the store is populated before the first scheduled tick.
    updater.run_cycle().await;

    let schedule = DailySchedule::new(config.update_time, config.update_timezone);
    tracing::info!(
        "Scheduling daily updates at {} {}",
        config.update_time.format("%H:%M"),
        config.update_timezone
    );

    let updater_ref = &updater;
    Scheduler::new(schedule)
        .run(
            move || async move {
                updater_ref.run_cycle().await;
            },
            async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
                tracing::info!("Ctrl-C received, shutting down");
            },
        )
        .await;

    drop(updater);
    match Arc::try_unwrap(store) {
        Ok(store) => store.close().await,
        Err(_) => tracing::warn!("Redis connection still in use at shutdown"),
    }

    Ok(())
}
