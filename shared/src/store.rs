use crate::error::RateError;
use crate::models::{format_rate, RateSnapshot};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// Shared key-value storage of the latest rate per currency code.
#[async_trait]
pub trait RateStore: Send + Sync {
    async fn set_rate(&self, code: &str, value: &str) -> Result<(), RateError>;

    /// Writes a whole snapshot, one entry per code.
    ///
    /// The default issues one `set_rate` per entry; implementations that can
    /// apply the writes as a group should override it.
    async fn set_rates(&self, snapshot: &RateSnapshot) -> Result<(), RateError> {
        for (code, rate) in snapshot.iter() {
            self.set_rate(code, &format_rate(rate)).await?;
        }
        Ok(())
    }

    async fn get_rate(&self, code: &str) -> Result<Option<String>, RateError>;

    /// All codes currently stored, in the store's enumeration order.
    async fn list_codes(&self) -> Result<Vec<String>, RateError>;
}

/// In-process store, enumerates codes in first-insertion order.
#[derive(Default)]
pub struct MemoryRateStore {
    inner: Mutex<Vec<(String, String)>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: &[(&str, &str)]) -> Self {
        let entries = rates
            .iter()
            .map(|(code, value)| (code.to_string(), value.to_string()))
            .collect();
        Self {
            inner: Mutex::new(entries),
        }
    }

    fn upsert(entries: &mut Vec<(String, String)>, code: &str, value: String) {
        match entries.iter_mut().find(|(c, _)| c == code) {
            Some(entry) => entry.1 = value,
            None => entries.push((code.to_string(), value)),
        }
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn set_rate(&self, code: &str, value: &str) -> Result<(), RateError> {
        let mut entries = self.inner.lock().await;
        debug!("Memory store SET {} = {}", code, value);
        Self::upsert(&mut entries, code, value.to_string());
        Ok(())
    }

    async fn set_rates(&self, snapshot: &RateSnapshot) -> Result<(), RateError> {
        let mut entries = self.inner.lock().await;
        for (code, rate) in snapshot.iter() {
            Self::upsert(&mut entries, code, format_rate(rate));
        }
        debug!("Memory store wrote {} rates", snapshot.len());
        Ok(())
    }

    async fn get_rate(&self, code: &str) -> Result<Option<String>, RateError> {
        let entries = self.inner.lock().await;
        Ok(entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, value)| value.clone()))
    }

    async fn list_codes(&self) -> Result<Vec<String>, RateError> {
        let entries = self.inner.lock().await;
        Ok(entries.iter().map(|(code, _)| code.clone()).collect())
    }
}
