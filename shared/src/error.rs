use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    /// Feed unreachable or answered with a non-success status.
    #[error("network error: {0}")]
    Network(String),
    /// Malformed feed document or a bad entry in it.
    #[error("parse error: {0}")]
    Parse(String),
    /// Malformed user command.
    #[error("invalid command format")]
    Format,
    /// Currency codes absent from the store.
    #[error("rate not found for {}", .0.join(", "))]
    Lookup(Vec<String>),
    #[error("store error: {0}")]
    Store(String),
}

impl From<redis::RedisError> for RateError {
    fn from(err: redis::RedisError) -> Self {
        RateError::Store(err.to_string())
    }
}
