//! Reduce step: one oracle call over all partial verdicts.

use tracing::warn;

use hscase_core::traits::Oracle;

use crate::dispatch::Verdict;
use crate::retry::{with_retry, RetryPolicy};

/// Issue the single aggregation call and return its response verbatim.
///
/// On failure the aggregator degrades to concatenating the partial
/// verdicts with an explanatory note; it never fails the whole request.
pub async fn aggregate(
    oracle: &dyn Oracle,
    retry: &RetryPolicy,
    final_prompt: &str,
    partials: &[Verdict],
) -> String {
    match with_retry(retry, || oracle.complete(final_prompt)).await {
        Ok(text) => text,
        Err(err) => {
            warn!("aggregation call failed, returning partial verdicts: {err}");
            let mut out = String::from(
                "The final synthesis step failed; the individual group verdicts follow.\n\n",
            );
            for verdict in partials {
                out.push_str(&format!("[Group {}]\n{}\n\n", verdict.group_id + 1, verdict.text));
            }
            out
        }
    }
}
