//! Shared fixtures for the mabi-market integration tests.
//!
//! Provides a scripted [`PriceSource`] whose per-call outcomes are queued
//! up front, plus row/summary constructors used across the test files.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use mabi_market::{PriceRow, PriceSource, QueryError, RetryPolicy};

/// A `PriceSource` that replays a queue of scripted outcomes, one per
/// `fetch_rows` call, and counts how many calls it received. Once the
/// queue is drained, further calls fail permanently (a test that gets
/// there queued too few outcomes). Clones share the queue and counter, so
/// tests can keep a handle for assertions after handing one to a service.
#[derive(Clone)]
pub struct ScriptedSource {
    outcomes: Arc<Mutex<VecDeque<Result<Vec<PriceRow>, QueryError>>>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new(outcomes: Vec<Result<Vec<PriceRow>, QueryError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch_rows(&self, _item_name: &str) -> Result<Vec<PriceRow>, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .expect("outcome queue lock")
            .pop_front()
            .unwrap_or_else(|| Err(QueryError::Permanent("script exhausted".to_string())))
    }
}

/// Listing at `unit_price` x `quantity`, collected at a fixed base time
/// plus `minutes_offset`.
pub fn row(unit_price: f64, quantity: u32, minutes_offset: i64) -> PriceRow {
    let base = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    PriceRow {
        unit_price,
        quantity,
        collected_at: base + chrono::Duration::minutes(minutes_offset),
    }
}

/// The three-listing market from the end-to-end averaging scenario:
/// 3 @ 20000, 5 @ 25000, 2 @ 30000.
pub fn sample_rows() -> Vec<PriceRow> {
    vec![row(20_000.0, 3, 0), row(25_000.0, 5, 1), row(30_000.0, 2, 2)]
}

/// Retry policy with real bounds but millisecond delays, so retry-heavy
/// tests finish quickly.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(4))
}
