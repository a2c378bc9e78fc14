//! Bounded retry with exponential backoff.
//!
//! One parametrized policy shared by every external call, instead of
//! per-call-site retry loops. Only retryable [`QueryError`] classes are
//! retried; permanent failures return on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::config;
use crate::error::QueryError;

/// Retry parameters: total attempt bound, initial delay, delay cap.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: config::MAX_ATTEMPTS,
            base_delay: config::RETRY_BASE_DELAY,
            max_delay: config::RETRY_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Run `op` until it succeeds, fails permanently, or the attempt bound
    /// is reached. The delay doubles after each failed attempt, capped at
    /// `max_delay`.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, QueryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, QueryError>>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 1u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "query attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(self.max_delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
