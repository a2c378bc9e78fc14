//! Wire and domain types for auction price data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRow — one auction listing as returned by the store
// ---------------------------------------------------------------------------

/// A single auction listing for an item. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRow {
    /// Price per single unit in this listing. Always positive.
    pub unit_price: f64,
    /// Number of units offered at that price. At least 1.
    pub quantity: u32,
    /// When the listing was scraped from the in-game auction house.
    pub collected_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// PriceBucket / PriceSummary — aggregated view served to clients
// ---------------------------------------------------------------------------

/// One (price, count) bucket in a summary's price list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub price: f64,
    pub count: u32,
}

/// Aggregated price view for one item, recomputed on every successful
/// query and cached by item name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub item_name: String,
    /// Quantity-weighted mean over `price_list`, rounded to the nearest gold.
    pub avg_price: i64,
    pub lowest_price: f64,
    /// Total units across all buckets.
    pub total_items: u64,
    /// Latest collection timestamp among contributing rows.
    pub collected_at: DateTime<Utc>,
    /// Buckets sorted ascending by price.
    pub price_list: Vec<PriceBucket>,
}

// ---------------------------------------------------------------------------
// DataSource — where a served summary came from
// ---------------------------------------------------------------------------

/// Why the service had to substitute static fallback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Connection configuration was never provided.
    ConfigMissing,
    /// The live query succeeded but matched no listings.
    NoData,
    /// The live query failed and no fresh cache entry existed.
    QueryFailed,
}

impl FallbackReason {
    /// Machine-readable reason string carried in the response body.
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::ConfigMissing => "config_missing",
            FallbackReason::NoData => "no_data_found",
            FallbackReason::QueryFailed => "connection_error",
        }
    }
}

/// Provenance tag attached to every served [`PriceSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Freshly queried from the auction store.
    Live,
    /// Served from the in-memory response cache after a query failure.
    Cache,
    /// Static substitute data.
    Fallback(FallbackReason),
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Cache => "cache",
            DataSource::Fallback(FallbackReason::ConfigMissing) => "fallback(config-missing)",
            DataSource::Fallback(FallbackReason::NoData) => "fallback(no-data)",
            DataSource::Fallback(FallbackReason::QueryFailed) => "fallback(error)",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback(_))
    }

    /// HTTP `Cache-Control` max-age for responses from this source.
    /// Live answers are the most cacheable; substitutes expire quickly so
    /// clients re-ask once the store recovers.
    pub fn max_age_secs(&self) -> u32 {
        match self {
            DataSource::Live => 300,
            DataSource::Cache => 120,
            DataSource::Fallback(_) => 60,
        }
    }
}
