//! Connection configuration and tuning defaults.
//!
//! The remote auction store is reached over its REST interface; the two
//! required settings (endpoint URL and access key) come from the
//! environment. Everything else is a named constant so the query layer,
//! cache, and retry policy all pull their numbers from one place.

use std::env;
use std::time::Duration;

use crate::error::{MarketError, Result};

/// Environment variable holding the REST endpoint base URL.
pub const ENV_DB_URL: &str = "MARKET_DB_URL";
/// Environment variable holding the access key for the REST endpoint.
pub const ENV_DB_KEY: &str = "MARKET_DB_KEY";

/// Table holding one row per active auction listing.
pub const AUCTION_TABLE: &str = "auction_list";

/// Only the cheapest N listings are considered when averaging. Business
/// rule, not a paging detail: the market tail is ignored on purpose.
pub const QUERY_LIMIT: usize = 10;

/// Deadline for a single query attempt.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(8);

/// Total attempts per logical query (first try + retries).
pub const MAX_ATTEMPTS: u32 = 3;
/// First backoff delay; doubles per attempt.
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);
/// Upper bound on the backoff delay between attempts.
pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// How long a cached price summary stays servable.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);
/// Maximum number of cached item summaries before oldest-inserted eviction.
pub const CACHE_CAPACITY: usize = 100;

// ---------------------------------------------------------------------------
// MarketConfig
// ---------------------------------------------------------------------------

/// Connection settings for the remote auction store.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Base URL of the REST endpoint, e.g. `https://db.example.com`.
    pub db_url: String,
    /// Access key sent as both `apikey` header and bearer token.
    pub db_key: String,
}

impl MarketConfig {
    /// Read and validate connection settings from the environment.
    ///
    /// Returns `Config` errors for missing variables or a malformed URL;
    /// callers typically treat any error as "run without a live source".
    pub fn from_env() -> Result<Self> {
        let db_url = env::var(ENV_DB_URL)
            .map_err(|_| MarketError::Config(format!("{ENV_DB_URL} is not set")))?;
        let db_key = env::var(ENV_DB_KEY)
            .map_err(|_| MarketError::Config(format!("{ENV_DB_KEY} is not set")))?;
        Self::new(db_url, db_key)
    }

    /// Validate explicit settings (used by tests and non-env deployments).
    pub fn new(db_url: impl Into<String>, db_key: impl Into<String>) -> Result<Self> {
        let db_url = db_url.into().trim().trim_end_matches('/').to_string();
        let db_key = db_key.into();

        if !db_url.starts_with("https://") {
            // A postgres:// connection string is the common misconfiguration
            // here; the query layer needs the REST URL, not the DB one.
            return Err(MarketError::Config(format!(
                "{ENV_DB_URL} must be an https:// REST endpoint (got '{}...')",
                truncated(&db_url, 16)
            )));
        }
        if db_key.trim().is_empty() {
            return Err(MarketError::Config(format!("{ENV_DB_KEY} is empty")));
        }

        Ok(Self { db_url, db_key })
    }
}

fn truncated(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
