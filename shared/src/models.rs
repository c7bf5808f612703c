use crate::error::RateError;

/// One parsed feed: currency code to rate, in feed order.
///
/// Inserting a code that is already present replaces its rate in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateSnapshot {
    entries: Vec<(String, f64)>,
}

impl RateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        let code = code.into();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = rate,
            None => self.entries.push((code, rate)),
        }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, rate)| *rate)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

/// Shortest float text that always carries a fractional part: `10.0`, `90.5`.
pub fn format_number(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e']) {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Text form of a rate as it is kept in the store.
pub fn format_rate(rate: f64) -> String {
    format_number(rate)
}

/// A parsed `/exchange <FROM> <TO> <AMOUNT>` command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl ExchangeRequest {
    /// Parses the raw command line, command name included.
    pub fn parse(text: &str) -> Result<Self, RateError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [_command, from, to, amount] = tokens.as_slice() else {
            return Err(RateError::Format);
        };

        let amount: f64 = amount.parse().map_err(|_| RateError::Format)?;
        if !amount.is_finite() {
            return Err(RateError::Format);
        }

        Ok(ExchangeRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        })
    }

    pub fn convert(&self, from_rate: f64, to_rate: f64) -> f64 {
        self.amount * from_rate / to_rate
    }
}
