use crate::repositories::rate_repository::RateRepository;
use shared::{format_number, ExchangeRequest, RateError, RateStore};
use std::sync::Arc;

pub const FORMAT_ERROR: &str =
    "Неверный формат команды. Используйте: /exchange <FROM> <TO> <AMOUNT>";
pub const RATE_NOT_FOUND: &str = "Не удалось найти курс для";
pub const RATES_UNAVAILABLE: &str = "Не удалось получить курсы валют. Попробуйте позже.";

/// Answers `/exchange` and `/rates` from the rate store.
///
/// Every method returns the reply text; failures are turned into replies
/// instead of being propagated.
pub struct RateService {
    repo: RateRepository,
}

impl RateService {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        let repo = RateRepository::new(store);
        Self { repo }
    }

    /// Converts the amount in a raw `/exchange <FROM> <TO> <AMOUNT>` line.
    pub async fn convert(&self, text: &str) -> String {
        match self.try_convert(text).await {
            Ok(reply) => reply,
            Err(RateError::Format) => FORMAT_ERROR.to_string(),
            Err(RateError::Lookup(codes)) => format!("{} {}", RATE_NOT_FOUND, codes.join(", ")),
            Err(e) => generic_error(e),
        }
    }

    async fn try_convert(&self, text: &str) -> Result<String, RateError> {
        let request = ExchangeRequest::parse(text)?;

        let from_rate = self.repo.find_rate(&request.from).await?;
        let to_rate = self.repo.find_rate(&request.to).await?;
        let (from_rate, to_rate) = match (from_rate, to_rate) {
            (Some(from_rate), Some(to_rate)) => (from_rate, to_rate),
            (from_rate, to_rate) => {
                let mut missing = Vec::new();
                if from_rate.is_none() {
                    missing.push(request.from.clone());
                }
                if to_rate.is_none() && !missing.contains(&request.to) {
                    missing.push(request.to.clone());
                }
                return Err(RateError::Lookup(missing));
            }
        };

        let result = request.convert(from_rate, to_rate);
        Ok(format!(
            "{} {} = {:.2} {}",
            format_number(request.amount),
            request.from,
            result,
            request.to
        ))
    }

    /// One `<code>: <rate>` line per stored currency.
    pub async fn list_rates(&self) -> String {
        match self.repo.list_all().await {
            Ok(rates) if rates.is_empty() => RATES_UNAVAILABLE.to_string(),
            Ok(rates) => rates
                .iter()
                .map(|(code, rate)| format!("{}: {}", code, rate))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => generic_error(e),
        }
    }
}

fn generic_error(e: RateError) -> String {
    tracing::error!("Rate query failed: {}", e);
    format!("Ошибка: {}", e)
}
