//! End-to-end tests for the price service degradation cascade:
//! live query -> cache -> static fallback.

mod common;

use std::time::Duration;

use mabi_market::{
    DataSource, FallbackProvider, FallbackReason, PriceService, QueryError, ResponseCache,
};

use common::{fast_retry, sample_rows, ScriptedSource};

fn timeout() -> QueryError {
    QueryError::Timeout(Duration::from_secs(8))
}

fn service_with(source: ScriptedSource) -> PriceService {
    PriceService::builder()
        .source(Box::new(source))
        .retry(fast_retry())
        .build()
}

// ---------------------------------------------------------------------------
// Live path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn live_rows_are_summarized_and_tagged_live() {
    let service = service_with(ScriptedSource::new(vec![Ok(sample_rows())]));

    let lookup = service.lookup("Mutant Rabbit's Foot").await;

    assert_eq!(lookup.source, DataSource::Live);
    assert_eq!(lookup.summary.avg_price, 25_000);
    assert_eq!(lookup.summary.lowest_price, 20_000.0);
    assert_eq!(lookup.summary.total_items, 10);
    assert_eq!(service.cached_items(), 1);
}

#[tokio::test]
async fn transient_failure_then_success_still_serves_live() {
    let service = service_with(ScriptedSource::new(vec![
        Err(timeout()),
        Ok(sample_rows()),
    ]));

    let lookup = service.lookup("Silk").await;

    assert_eq!(lookup.source, DataSource::Live);
    assert_eq!(lookup.summary.avg_price, 25_000);
}

// ---------------------------------------------------------------------------
// Fallback paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_source_serves_fallback_config_missing() {
    let service = PriceService::builder().build();

    let lookup = service.lookup("Silk").await;

    assert_eq!(
        lookup.source,
        DataSource::Fallback(FallbackReason::ConfigMissing)
    );
    // Known fallback item keeps its hardcoded prices.
    assert_eq!(lookup.summary.avg_price, 8_000);
    assert_eq!(lookup.summary.lowest_price, 6_000.0);
}

#[tokio::test]
async fn zero_rows_serves_fallback_no_data() {
    let service = service_with(ScriptedSource::new(vec![Ok(Vec::new())]));

    let lookup = service.lookup("Fine Leather").await;

    assert_eq!(lookup.source, DataSource::Fallback(FallbackReason::NoData));
    assert_eq!(lookup.summary.avg_price, 15_000);
    // An empty result is not cached.
    assert_eq!(service.cached_items(), 0);
}

#[tokio::test]
async fn three_timeouts_and_empty_cache_serve_fallback_provider_output() {
    let source = ScriptedSource::new(vec![Err(timeout()), Err(timeout()), Err(timeout())]);
    let service = service_with(source);

    let lookup = service.lookup("Sasquatch Heart").await;

    assert_eq!(
        lookup.source,
        DataSource::Fallback(FallbackReason::QueryFailed)
    );
    let expected = FallbackProvider::builtin().get("Sasquatch Heart");
    assert_eq!(lookup.summary.avg_price, expected.avg_price);
    assert_eq!(lookup.summary.lowest_price, expected.lowest_price);
    assert_eq!(lookup.summary.price_list, expected.price_list);
}

#[tokio::test]
async fn unknown_item_gets_generic_placeholder() {
    let service = PriceService::builder().build();

    let lookup = service.lookup("Completely Unheard-Of Trinket").await;

    assert!(lookup.source.is_fallback());
    assert_eq!(lookup.summary.item_name, "Completely Unheard-Of Trinket");
    assert_eq!(lookup.summary.avg_price, 10_000);
    assert_eq!(lookup.summary.lowest_price, 8_000.0);
}

// ---------------------------------------------------------------------------
// Cache path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_failure_serves_fresh_cache_entry() {
    // First lookup succeeds and populates the cache; the next one fails
    // through all retries and must serve the cached summary.
    let source = ScriptedSource::new(vec![
        Ok(sample_rows()),
        Err(timeout()),
        Err(timeout()),
        Err(timeout()),
    ]);
    let service = service_with(source);

    let live = service.lookup("Silk").await;
    assert_eq!(live.source, DataSource::Live);

    let cached = service.lookup("Silk").await;
    assert_eq!(cached.source, DataSource::Cache);
    assert_eq!(cached.summary, live.summary);
}

#[tokio::test]
async fn transient_failures_hit_the_source_exactly_three_times() {
    let source = ScriptedSource::new(vec![Err(timeout()), Err(timeout()), Err(timeout())]);
    let handle = source.clone();
    let service = PriceService::builder()
        .source(Box::new(source))
        .retry(fast_retry())
        .cache(ResponseCache::new(100, Duration::from_secs(3600)))
        .build();

    let lookup = service.lookup("Silk").await;
    assert!(lookup.source.is_fallback());
    assert_eq!(handle.calls(), 3);
}

#[tokio::test]
async fn permanent_failure_skips_retries_and_falls_back() {
    let source = ScriptedSource::new(vec![Err(QueryError::Permanent(
        "missing table".to_string(),
    ))]);
    let handle = source.clone();
    let service = service_with(source);

    let lookup = service.lookup("Silk").await;
    assert_eq!(
        lookup.source,
        DataSource::Fallback(FallbackReason::QueryFailed)
    );
    assert_eq!(handle.calls(), 1);
}
