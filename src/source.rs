//! Query layer for the remote auction store.
//!
//! The store only needs to support an item-name equality filter, ascending
//! numeric sort, and a row limit, so the seam is a small trait rather than
//! a database client. [`RestSource`] implements it over the store's
//! PostgREST-style HTTP interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::{self, MarketConfig};
use crate::error::{QueryError, Result};
use crate::models::PriceRow;

/// Abstract access to auction listings for one item.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch up to [`config::QUERY_LIMIT`] listings for `item_name`,
    /// cheapest first. One attempt; retries belong to the caller's policy.
    async fn fetch_rows(&self, item_name: &str) -> std::result::Result<Vec<PriceRow>, QueryError>;
}

// ---------------------------------------------------------------------------
// RestSource
// ---------------------------------------------------------------------------

/// Raw row shape as the auction table serves it.
#[derive(Deserialize)]
struct AuctionRow {
    auction_price_per_unit: f64,
    item_count: Option<u32>,
    collected_at: Option<DateTime<Utc>>,
}

impl From<AuctionRow> for PriceRow {
    fn from(row: AuctionRow) -> Self {
        PriceRow {
            unit_price: row.auction_price_per_unit,
            // Old scraper rows predate the count column.
            quantity: row.item_count.unwrap_or(1).max(1),
            collected_at: row.collected_at.unwrap_or_else(Utc::now),
        }
    }
}

/// [`PriceSource`] over the auction store's REST interface.
pub struct RestSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: std::time::Duration,
}

impl RestSource {
    pub fn new(cfg: &MarketConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config::QUERY_TIMEOUT)
            .user_agent("mabi-market/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.db_url.clone(),
            api_key: cfg.db_key.clone(),
            timeout: config::QUERY_TIMEOUT,
        })
    }
}

#[async_trait]
impl PriceSource for RestSource {
    async fn fetch_rows(&self, item_name: &str) -> std::result::Result<Vec<PriceRow>, QueryError> {
        let url = format!("{}/rest/v1/{}", self.base_url, config::AUCTION_TABLE);
        let request = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[
                (
                    "select",
                    "auction_price_per_unit,item_count,collected_at".to_string(),
                ),
                ("item_name", format!("eq.{item_name}")),
                ("auction_price_per_unit", "not.is.null".to_string()),
                ("order", "auction_price_per_unit.asc".to_string()),
                ("limit", config::QUERY_LIMIT.to_string()),
            ]);

        let attempt = async {
            let resp = request.send().await.map_err(|e| classify(&e, self.timeout))?;
            let status = resp.status();
            if !status.is_success() {
                let detail = resp.text().await.unwrap_or_default();
                return Err(classify_status(status, &detail));
            }
            let rows: Vec<AuctionRow> = resp
                .json()
                .await
                .map_err(|e| QueryError::Permanent(format!("malformed response body: {e}")))?;
            Ok(rows.into_iter().map(PriceRow::from).collect())
        };

        // Outer deadline covers the full attempt including body read.
        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(QueryError::Timeout(self.timeout)),
        }
    }
}

/// Map a transport-level error onto the query taxonomy.
fn classify(err: &reqwest::Error, timeout: std::time::Duration) -> QueryError {
    if err.is_timeout() {
        QueryError::Timeout(timeout)
    } else if err.is_decode() || err.is_builder() {
        QueryError::Permanent(err.to_string())
    } else {
        QueryError::Transient(err.to_string())
    }
}

/// Map an HTTP status onto the query taxonomy. Server-side and
/// rate-limit statuses are transient; everything else (bad query,
/// missing table, auth) is permanent.
fn classify_status(status: reqwest::StatusCode, detail: &str) -> QueryError {
    if status.is_server_error()
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    {
        QueryError::Transient(format!("store returned {status}: {detail}"))
    } else {
        QueryError::Permanent(format!("store returned {status}: {detail}"))
    }
}
