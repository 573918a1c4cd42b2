use crate::error::OracleError;
use crate::types::SearchHit;

/// A retrieval engine over one corpus partition. Implementations are
/// read-only after construction and safe to share across threads.
///
/// Hits below `min_similarity` are dropped; at most `top_k` survive.
pub trait CaseSearcher: Send + Sync {
    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<SearchHit>;
}

/// The external classification oracle: prompt text in, free text out.
///
/// Implementations must map failures onto the transient/permanent split of
/// [`OracleError`]; retrying is the caller's concern.
#[async_trait::async_trait]
pub trait Oracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}
