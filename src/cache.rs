//! Bounded in-memory cache of price summaries.
//!
//! Serves stale-but-valid data when the live query fails. Entries expire
//! after a TTL on read (without being evicted) and the map is capped by
//! insertion-order eviction: the earliest-inserted key goes first, not the
//! least-recently-read one. Overwriting a key keeps its original insertion
//! position.
//!
//! The clock is an explicit parameter on the `*_at` variants so tests can
//! simulate elapsed time; `get`/`put` use `Instant::now()`.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::config;
use crate::models::PriceSummary;

struct CacheEntry {
    value: PriceSummary,
    stored_at: Instant,
}

pub struct ResponseCache {
    capacity: usize,
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order; only new keys are pushed.
    order: VecDeque<String>,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Cache with the service defaults (100 entries, 1 hour TTL).
    pub fn with_defaults() -> Self {
        Self::new(config::CACHE_CAPACITY, config::CACHE_TTL)
    }

    pub fn get(&self, key: &str) -> Option<&PriceSummary> {
        self.get_at(key, Instant::now())
    }

    /// Fresh-entry lookup at an explicit point in time. A stale entry
    /// behaves as absent but stays in the map; only size-based eviction
    /// removes entries.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<&PriceSummary> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            Some(&entry.value)
        } else {
            None
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: PriceSummary) {
        self.put_at(key, value, Instant::now());
    }

    /// Insert or overwrite at an explicit point in time. After inserting a
    /// new key past capacity, exactly one entry is removed: the
    /// earliest-inserted key still present.
    pub fn put_at(&mut self, key: impl Into<String>, value: PriceSummary, now: Instant) {
        let key = key.into();
        let is_new = !self.entries.contains_key(&key);
        self.entries.insert(
            key.clone(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );
        if is_new {
            self.order.push_back(key);
            if self.entries.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
