use anyhow::{anyhow, Context};
use chrono::NaiveTime;
use chrono_tz::Tz;
use dotenv::dotenv;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

pub struct Config {
    pub redis_url: String,
    pub bot_token: Option<String>,
    pub feed_url: String,
    pub feed_timeout: Duration,
    pub update_timezone: Tz,
    pub update_time: NaiveTime,
    pub reference_currency: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let redis_url = match var("REDIS_URL") {
            Some(url) => url,
            None => {
                let host = var("REDIS_HOST").unwrap_or_else(|| "localhost".to_string());
                let port: u16 = var("REDIS_PORT")
                    .unwrap_or_else(|| "6379".to_string())
                    .parse()
                    .context("REDIS_PORT must be a port number")?;
                format!("redis://{}:{}", host, port)
            }
        };

        let timezone = var("UPDATE_TIMEZONE").unwrap_or_else(|| "Europe/Moscow".to_string());
        let update_timezone: Tz = timezone
            .parse()
            .map_err(|e| anyhow!("UPDATE_TIMEZONE {} is not a known time zone: {}", timezone, e))?;

        let time = var("UPDATE_TIME").unwrap_or_else(|| "00:00".to_string());
        let update_time = NaiveTime::parse_from_str(&time, "%H:%M")
            .with_context(|| format!("UPDATE_TIME {} must be HH:MM", time))?;

        let feed_timeout_secs: u64 = var("FEED_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("FEED_TIMEOUT_SECS must be a number of seconds")?;

        let reference_currency = var("REFERENCE_CURRENCY")
            .unwrap_or_else(|| "RUB".to_string())
            .trim()
            .to_uppercase();

        Ok(Config {
            redis_url,
            bot_token: var("TELEGRAM_API_TOKEN").or_else(|| var("BOT_TOKEN")),
            feed_url: var("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            feed_timeout: Duration::from_secs(feed_timeout_secs),
            update_timezone,
            update_time,
            reference_currency: (!reference_currency.is_empty()).then_some(reference_currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.bot_token, None);
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.feed_timeout, Duration::from_secs(30));
        assert_eq!(config.update_timezone, chrono_tz::Europe::Moscow);
        assert_eq!(config.update_time, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(config.reference_currency.as_deref(), Some("RUB"));
    }

    #[test]
    fn test_redis_host_and_port() {
        let config = config_from(&[("REDIS_HOST", "cache"), ("REDIS_PORT", "6380")]).unwrap();
        assert_eq!(config.redis_url, "redis://cache:6380");

        let config = config_from(&[
            ("REDIS_URL", "redis://other:1/2"),
            ("REDIS_HOST", "cache"),
        ])
        .unwrap();
        assert_eq!(config.redis_url, "redis://other:1/2");
    }

    #[test]
    fn test_token_alias() {
        let config = config_from(&[("BOT_TOKEN", "abc")]).unwrap();
        assert_eq!(config.bot_token.as_deref(), Some("abc"));

        let config = config_from(&[("BOT_TOKEN", "abc"), ("TELEGRAM_API_TOKEN", "xyz")]).unwrap();
        assert_eq!(config.bot_token.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_empty_reference_currency_disables_it() {
        let config = config_from(&[("REFERENCE_CURRENCY", "")]).unwrap();
        assert_eq!(config.reference_currency, None);

        let config = config_from(&[("REFERENCE_CURRENCY", "usd")]).unwrap();
        assert_eq!(config.reference_currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("REDIS_PORT", "redis")]).is_err());
        assert!(config_from(&[("UPDATE_TIMEZONE", "Mars/Olympus")]).is_err());
        assert!(config_from(&[("UPDATE_TIME", "midnight")]).is_err());
        assert!(config_from(&[("FEED_TIMEOUT_SECS", "-1")]).is_err());
    }
}
