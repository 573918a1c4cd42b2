//! Retry policy for oracle calls.
//!
//! A value object: bounded attempt count, exponential backoff with uniform
//! jitter, and the transient-only predicate baked in. A server-provided
//! retry-after hint overrides the computed backoff, clamped to sane bounds.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use hscase_core::error::OracleError;

const RETRY_AFTER_MIN: Duration = Duration::from_millis(500);
const RETRY_AFTER_MAX: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub multiplier: f64,
    pub jitter_min: Duration,
    pub jitter_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            multiplier: 2.0,
            jitter_min: Duration::from_millis(200),
            jitter_max: Duration::from_millis(800),
        }
    }
}

impl RetryPolicy {
    /// Backoff (pre-jitter) for a zero-based retry attempt.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let factor = self.multiplier.powi(attempt.min(16) as i32);
        self.base_delay.mul_f64(factor)
    }

    fn jitter(&self) -> Duration {
        if self.jitter_max <= self.jitter_min {
            return self.jitter_min;
        }
        let span = (self.jitter_max - self.jitter_min).as_millis() as u64;
        let extra = rand::thread_rng().gen_range(0..=span);
        self.jitter_min + Duration::from_millis(extra)
    }

    fn wait_before_retry(&self, attempt: usize, err: &OracleError) -> Duration {
        let base = match err {
            OracleError::Transient { retry_after: Some(hint), .. } => {
                (*hint).clamp(RETRY_AFTER_MIN, RETRY_AFTER_MAX)
            }
            _ => self.delay_for_attempt(attempt),
        };
        base + self.jitter()
    }
}

/// Run `call` under `policy`, retrying transient failures only. Permanent
/// failures and exhausted attempts return the last error.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut call: F) -> Result<T, OracleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OracleError>>,
{
    let mut attempt = 0usize;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if !err.is_transient() || attempt >= policy.max_attempts {
                    return Err(err);
                }
                let wait = policy.wait_before_retry(attempt - 1, &err);
                warn!(
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    "transient oracle failure, backing off: {err}"
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}
