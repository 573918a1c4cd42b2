//! Bounded parallel dispatch of per-group classification calls.

use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use hscase_core::traits::Oracle;

use crate::retry::{with_retry, RetryPolicy};

/// Size of the shared worker pool: at most this many oracle calls are in
/// flight at once; excess groups queue on the semaphore.
pub const WORKER_CAP: usize = 3;

/// A partial verdict for one group.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub group_id: usize,
    pub text: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// Fans prompts out to the oracle under a fixed-size worker pool.
///
/// There is no cancellation: once dispatched, every group call runs to
/// completion or errors individually. A failed call becomes an inline
/// error-text verdict scoped to its group and never aborts siblings.
pub struct Dispatcher {
    oracle: Arc<dyn Oracle>,
    retry: RetryPolicy,
    limit: Arc<Semaphore>,
}

impl Dispatcher {
    pub fn new(oracle: Arc<dyn Oracle>, retry: RetryPolicy) -> Self {
        Self::with_cap(oracle, retry, WORKER_CAP)
    }

    pub fn with_cap(oracle: Arc<dyn Oracle>, retry: RetryPolicy, cap: usize) -> Self {
        Self {
            oracle,
            retry,
            limit: Arc::new(Semaphore::new(cap)),
        }
    }

    pub fn oracle(&self) -> Arc<dyn Oracle> {
        Arc::clone(&self.oracle)
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// One classification call per prompt. Verdicts are collected as they
    /// complete, then reassembled into canonical group order so downstream
    /// logic never observes completion-order nondeterminism.
    pub async fn dispatch(&self, prompts: Vec<String>) -> Vec<Verdict> {
        let mut tasks = FuturesUnordered::new();
        for (group_id, prompt) in prompts.into_iter().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let limit = Arc::clone(&self.limit);
            let retry = self.retry;
            tasks.push(async move {
                let permit = limit.acquire_owned().await;
                let started_at = Utc::now();
                let start = Instant::now();
                let text = match permit {
                    Ok(_permit) => {
                        match with_retry(&retry, || oracle.complete(&prompt)).await {
                            Ok(answer) => answer,
                            Err(err) => {
                                warn!(group = group_id + 1, "group classification failed: {err}");
                                format!("Group {} analysis failed: {err}", group_id + 1)
                            }
                        }
                    }
                    Err(_) => format!("Group {} analysis failed: worker pool closed", group_id + 1),
                };
                Verdict {
                    group_id,
                    text,
                    started_at,
                    elapsed: start.elapsed(),
                }
            });
        }

        let mut verdicts = Vec::new();
        while let Some(verdict) = tasks.next().await {
            info!(
                group = verdict.group_id + 1,
                elapsed_ms = verdict.elapsed.as_millis() as u64,
                "group verdict collected"
            );
            verdicts.push(verdict);
        }
        verdicts.sort_by_key(|v| v.group_id);
        verdicts
    }
}
