//! Price lookup orchestration.
//!
//! One lookup runs the whole degradation cascade: live query (with retry)
//! into the cache, then cache, then static fallback. A lookup never fails
//! past this boundary; the caller always gets *a* summary plus a
//! provenance tag saying how much to trust it.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::cache::ResponseCache;
use crate::fallback::FallbackProvider;
use crate::models::{DataSource, FallbackReason, PriceSummary};
use crate::pricing;
use crate::retry::RetryPolicy;
use crate::source::PriceSource;

// ---------------------------------------------------------------------------
// PriceLookup / PriceResponse
// ---------------------------------------------------------------------------

/// Outcome of one price lookup.
#[derive(Debug, Clone)]
pub struct PriceLookup {
    pub summary: PriceSummary,
    pub source: DataSource,
    /// Wall-clock time spent on the lookup, including retries.
    pub query_time: Duration,
}

/// JSON body served for a price lookup: the summary fields flattened,
/// plus diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(flatten)]
    pub summary: PriceSummary,
    pub data_source: &'static str,
    /// Milliseconds spent on the lookup.
    pub query_time: u64,
    pub is_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<&'static str>,
}

impl From<PriceLookup> for PriceResponse {
    fn from(lookup: PriceLookup) -> Self {
        let fallback_reason = match lookup.source {
            DataSource::Fallback(reason) => Some(reason.as_str()),
            _ => None,
        };
        PriceResponse {
            data_source: lookup.source.label(),
            query_time: lookup.query_time.as_millis() as u64,
            is_fallback: lookup.source.is_fallback(),
            fallback_reason,
            summary: lookup.summary,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceServiceBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceService`].
pub struct PriceServiceBuilder {
    source: Option<Box<dyn PriceSource>>,
    cache: ResponseCache,
    fallback: FallbackProvider,
    retry: RetryPolicy,
}

impl Default for PriceServiceBuilder {
    fn default() -> Self {
        Self {
            source: None,
            cache: ResponseCache::with_defaults(),
            fallback: FallbackProvider::builtin(),
            retry: RetryPolicy::default(),
        }
    }
}

impl PriceServiceBuilder {
    /// Set the live query source. Without one, every lookup serves
    /// fallback data tagged `fallback(config-missing)`.
    pub fn source(mut self, source: Box<dyn PriceSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn fallback(mut self, fallback: FallbackProvider) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> PriceService {
        PriceService {
            source: self.source,
            cache: Mutex::new(self.cache),
            fallback: self.fallback,
            retry: self.retry,
        }
    }
}

// ---------------------------------------------------------------------------
// PriceService
// ---------------------------------------------------------------------------

/// Composition root for price lookups: query layer, response cache,
/// fallback provider, and retry policy wired together.
pub struct PriceService {
    source: Option<Box<dyn PriceSource>>,
    cache: Mutex<ResponseCache>,
    fallback: FallbackProvider,
    retry: RetryPolicy,
}

impl PriceService {
    pub fn builder() -> PriceServiceBuilder {
        PriceServiceBuilder::default()
    }

    /// Whether a live source is configured.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Number of item summaries currently cached.
    pub fn cached_items(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Look up the current price summary for `item_name`.
    ///
    /// Terminal on the first branch that produces data:
    /// 1. no source configured  -> fallback (config-missing)
    /// 2. live query, >=1 row   -> summarize, cache, serve live
    /// 3. live query, 0 rows    -> fallback (no-data)
    /// 4. query failed          -> fresh cache entry if any, else
    ///                             fallback (error)
    pub async fn lookup(&self, item_name: &str) -> PriceLookup {
        let start = Instant::now();

        let Some(source) = self.source.as_deref() else {
            tracing::warn!(item = item_name, "no data source configured, serving fallback");
            return self.finish(
                self.fallback.get(item_name),
                DataSource::Fallback(FallbackReason::ConfigMissing),
                start,
            );
        };

        match self.retry.run(|| source.fetch_rows(item_name)).await {
            Ok(rows) => match pricing::summarize(item_name, &rows) {
                Some(summary) => {
                    tracing::info!(
                        item = item_name,
                        rows = rows.len(),
                        avg_price = summary.avg_price,
                        "live price data served"
                    );
                    if let Ok(mut cache) = self.cache.lock() {
                        cache.put(item_name, summary.clone());
                    }
                    self.finish(summary, DataSource::Live, start)
                }
                None => {
                    tracing::info!(item = item_name, "query matched no listings, serving fallback");
                    self.finish(
                        self.fallback.get(item_name),
                        DataSource::Fallback(FallbackReason::NoData),
                        start,
                    )
                }
            },
            Err(err) => {
                tracing::warn!(item = item_name, error = %err, "query failed after retries");
                let cached = self
                    .cache
                    .lock()
                    .ok()
                    .and_then(|cache| cache.get(item_name).cloned());
                match cached {
                    Some(summary) => {
                        tracing::info!(item = item_name, "serving cached price data");
                        self.finish(summary, DataSource::Cache, start)
                    }
                    None => self.finish(
                        self.fallback.get(item_name),
                        DataSource::Fallback(FallbackReason::QueryFailed),
                        start,
                    ),
                }
            }
        }
    }

    fn finish(&self, summary: PriceSummary, source: DataSource, start: Instant) -> PriceLookup {
        PriceLookup {
            summary,
            source,
            query_time: start.elapsed(),
        }
    }
}
