use shared::{RateError, RateStore};
use std::sync::Arc;
use tracing::debug;

pub struct RateRepository {
    store: Arc<dyn RateStore>,
}

impl RateRepository {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    pub async fn find_rate(&self, code: &str) -> Result<Option<f64>, RateError> {
        let Some(value) = self.store.get_rate(code).await? else {
            return Ok(None);
        };

        match value.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(Some(rate)),
            _ => Err(RateError::Store(format!(
                "stored rate for {} is not a positive number: {:?}",
                code, value
            ))),
        }
    }

    /// Every stored `(code, rate text)` pair, in store enumeration order.
    pub async fn list_all(&self) -> Result<Vec<(String, String)>, RateError> {
        let codes = self.store.list_codes().await?;
        let mut rates = Vec::with_capacity(codes.len());
        for code in codes {
            match self.store.get_rate(&code).await? {
                Some(value) => rates.push((code, value)),
                None => debug!("{} disappeared between listing and reading", code),
            }
        }
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::MemoryRateStore;

    fn repo_with(rates: &[(&str, &str)]) -> RateRepository {
        RateRepository::new(Arc::new(MemoryRateStore::with_rates(rates)))
    }

    #[tokio::test]
    async fn test_find_rate() {
        let repo = repo_with(&[("USD", "90.5"), ("RUB", "1.0")]);

        assert_eq!(repo.find_rate("USD").await.unwrap(), Some(90.5));
        assert_eq!(repo.find_rate("RUB").await.unwrap(), Some(1.0));
        assert_eq!(repo.find_rate("XYZ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_stored_rate_is_store_error() {
        let repo = repo_with(&[("USD", "ninety"), ("EUR", "0"), ("GBP", "-1.5")]);

        for code in ["USD", "EUR", "GBP"] {
            assert!(
                matches!(repo.find_rate(code).await, Err(RateError::Store(_))),
                "expected store error for {}",
                code
            );
        }
    }

    #[tokio::test]
    async fn test_list_all_keeps_store_order() {
        let repo = repo_with(&[("USD", "90.5"), ("EUR", "100.2")]);

        assert_eq!(
            repo.list_all().await.unwrap(),
            vec![
                ("USD".to_string(), "90.5".to_string()),
                ("EUR".to_string(), "100.2".to_string()),
            ]
        );
    }
}
