use crate::error::RateError;
use crate::models::{format_rate, RateSnapshot};
use crate::store::RateStore;
use anyhow::Result;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, Pipeline};
use tracing::{debug, info};

/// Rate store backed by Redis, one plain key per currency code.
pub struct RedisRateStore {
    conn: MultiplexedConnection,
}

impl RedisRateStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        info!("Connecting to Redis at: {}", redis_url);
        let client = Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self { conn })
    }

    pub async fn close(self) {
        info!("Closing Redis connection");
        drop(self.conn);
    }
}

#[async_trait]
impl RateStore for RedisRateStore {
    async fn set_rate(&self, code: &str, value: &str) -> Result<(), RateError> {
        let mut conn = self.conn.clone();
        debug!("SET {} {}", code, value);
        conn.set::<_, _, ()>(code, value).await?;
        Ok(())
    }

        async fn set_rates(&self, snapshot: &RateSnapshot) -> Result<(), RateError> {
        if snapshot.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        rates_pipeline(snapshot).query_async::<()>(&mut conn).await?;
        debug!("Wrote {} rates in one transaction", snapshot.len());
        Ok(())
    }

    async fn get_rate(&self, code: &str) -> Result<Option<String>, RateError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(code).await?;
        Ok(value)
    }

    async fn list_codes(&self) -> Result<Vec<String>, RateError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys("*").await?;
        Ok(keys)
    }
}

/// One `SET` per entry inside a single `MULTI`/`EXEC`, so readers see either
/// the previous cycle or the new one.
fn rates_pipeline(snapshot: &RateSnapshot) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for (code, rate) in snapshot.iter() {
        pipe.set(code, format_rate(rate)).ignore();
    }
    pipe
}
