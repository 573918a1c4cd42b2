use tracing::debug;

use hscase_core::corpus::CaseStore;
use hscase_core::types::{CaseRecord, SearchHit};

/// Split a query into normalized tokens: punctuation becomes whitespace,
/// tokens are lowercased and must be at least 2 characters. Duplicates are
/// retained; scoring dedups them.
pub fn tokenize(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordOptions {
    pub top_k: usize,
    /// Strip all whitespace from both token and text before matching, to
    /// catch compound-word variants written without a separating space.
    pub ignore_spaces: bool,
    /// Minimum number of distinct matched tokens for a record to qualify.
    pub min_tokens: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self { top_k: 10, ignore_spaces: false, min_tokens: 1 }
    }
}

/// Keyword engine over one case store. Holds no state of its own; the
/// store is read-only and shared.
pub struct KeywordMatcher<'a> {
    store: &'a CaseStore,
}

impl<'a> KeywordMatcher<'a> {
    pub fn new(store: &'a CaseStore) -> Self {
        Self { store }
    }

    /// OR-token search: a record's score is the number of distinct query
    /// tokens appearing as substrings of its concatenated searchable text.
    /// Results sort by score descending; ties keep corpus order.
    pub fn search_by_keyword(&self, query: &str, opts: KeywordOptions) -> Vec<SearchHit> {
        let mut tokens = tokenize(query);
        tokens.sort();
        tokens.dedup();
        if tokens.is_empty() {
            return Vec::new();
        }
        debug!(tokens = tokens.len(), "keyword search");

        let mut hits = Vec::new();
        for (ordinal, record) in self.store.records().iter().enumerate() {
            let searchable = searchable_text(record);
            let haystack = if opts.ignore_spaces {
                searchable.split_whitespace().collect::<String>()
            } else {
                searchable
            };

            let matched = tokens
                .iter()
                .filter(|token| {
                    if opts.ignore_spaces {
                        let needle: String = token.split_whitespace().collect();
                        haystack.contains(&needle)
                    } else {
                        haystack.contains(token.as_str())
                    }
                })
                .count();

            if matched >= opts.min_tokens {
                if let Some(id) = self.store.doc_id(ordinal) {
                    hits.push(SearchHit { id, score: matched as f32 });
                }
            }
        }

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(opts.top_k);
        hits
    }

    /// Exact-match linear scan on the reference-id field, bypassing
    /// similarity scoring entirely.
    pub fn find_by_reference(&self, ref_id: &str) -> Option<&'a CaseRecord> {
        self.store
            .records()
            .iter()
            .find(|record| record.reference_id == ref_id)
    }

    /// Partial code match: the query code (4–10 digits) must be a substring
    /// of the record's code once dots, spaces, and hyphens are stripped
    /// from both sides. Returns the first `top_k` records in corpus order.
    pub fn search_by_code(&self, code: &str, top_k: usize) -> Vec<&'a CaseRecord> {
        let needle = normalize_code(code);
        if needle.is_empty() {
            return Vec::new();
        }
        self.store
            .records()
            .iter()
            .filter(|record| normalize_code(&record.hs_code).contains(&needle))
            .take(top_k)
            .collect()
    }
}

fn searchable_text(record: &CaseRecord) -> String {
    format!(
        "{} {} {}",
        record.product_name, record.description, record.decision_reason
    )
    .to_lowercase()
}

fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !matches!(c, '.' | ' ' | '-'))
        .collect()
}
