use std::time::Duration;

/// Classified failure of a single market query.
///
/// The taxonomy is deliberately closed: callers branch on exactly three
/// classes when deciding whether to retry, serve cached data, or fall back
/// to static prices.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query did not complete within the configured deadline.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// Network-class failure (connection reset, DNS, transport). Retryable.
    #[error("transient query failure: {0}")]
    Transient(String),

    /// Query/schema/auth-class failure. Retrying cannot help.
    #[error("permanent query failure: {0}")]
    Permanent(String),
}

impl QueryError {
    /// Timeouts and transient network failures are worth another attempt;
    /// permanent failures are not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, QueryError::Permanent(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, MarketError>;
