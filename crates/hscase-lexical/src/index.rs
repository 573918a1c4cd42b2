use serde::{Deserialize, Serialize};

use hscase_core::traits::CaseSearcher;
use hscase_core::types::{DocId, Document, SearchHit};

use crate::vectorizer::{sparse_dot, NgramVectorizer, SparseVec};

pub const DEFAULT_TOP_K: usize = 100;
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

/// Batch-built character n-gram similarity index over one corpus snapshot.
///
/// Read-only once built; rebuilding means constructing a replacement, never
/// mutating in place. Invariant: `rows.len() == doc_ids.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalIndex {
    vectorizer: NgramVectorizer,
    rows: Vec<SparseVec>,
    doc_ids: Vec<DocId>,
}

impl LexicalIndex {
    pub fn build(documents: &[Document]) -> Self {
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let vectorizer = NgramVectorizer::fit(&texts);
        let rows = texts.iter().map(|t| vectorizer.transform(t)).collect();
        let doc_ids = documents.iter().map(|d| d.id.clone()).collect();
        Self { vectorizer, rows, doc_ids }
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    /// Rank all documents by cosine similarity to `query`, dropping scores
    /// below `min_similarity` and truncating to `top_k`. An empty corpus or
    /// a query with no indexed n-grams yields an empty result, never an
    /// error.
    pub fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<SearchHit> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let query_vec = self.vectorizer.transform(query);
        if query_vec.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .rows
            .iter()
            .zip(&self.doc_ids)
            .filter_map(|(row, id)| {
                let score = sparse_dot(&query_vec, row);
                (score >= min_similarity).then(|| SearchHit { id: id.clone(), score })
            })
            .collect();
        // stable sort: equal scores keep corpus order
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(top_k);
        hits
    }
}

impl CaseSearcher for LexicalIndex {
    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<SearchHit> {
        Self::search(self, query, top_k, min_similarity)
    }
}
