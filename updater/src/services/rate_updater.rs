use crate::services::feed_fetcher::FeedSource;
use crate::services::feed_parser;
use shared::{RateError, RateStore};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs fetch -> parse -> store write cycles.
pub struct RateUpdater {
    fetcher: Arc<dyn FeedSource>,
    store: Arc<dyn RateStore>,
    reference_currency: Option<String>,
}

impl RateUpdater {
    pub fn new(fetcher: Arc<dyn FeedSource>, store: Arc<dyn RateStore>) -> Self {
        Self {
            fetcher,
            store,
            reference_currency: None,
        }
    }

    /// Code written with rate 1 on every successful cycle, unless the feed
    /// already quotes it.
    pub fn with_reference_currency(mut self, code: Option<String>) -> Self {
        self.reference_currency = code;
        self
    }

    /// One full cycle. Returns the number of rates written.
    ///
    /// Nothing is written unless both the fetch and the parse succeed.
    pub async fn update_once(&self) -> Result<usize, RateError> {
        let document = self.fetcher.fetch().await?;
        let mut snapshot = feed_parser::parse(&document)?;
        if snapshot.is_empty() {
            return Err(RateError::Parse("feed contains no currency entries".to_string()));
        }
        info!("Parsed {} rates from feed", snapshot.len());

        if let Some(reference) = &self.reference_currency {
            if snapshot.contains(reference) {
                warn!("Feed already quotes reference currency {}, keeping feed value", reference);
            } else {
                snapshot.insert(reference.clone(), 1.0);
            }
        }

        self.store.set_rates(&snapshot).await?;
        Ok(snapshot.len())
    }

    /// Runs one cycle and logs the outcome; never fails.
    pub async fn run_cycle(&self) -> bool {
        match self.update_once().await {
            Ok(count) => {
                info!("✅ Rate update cycle finished, {} rates stored", count);
                true
            }
            Err(e) => {
                error!("Rate update cycle failed: {}", e);
                false
            }
        }
    }
}
