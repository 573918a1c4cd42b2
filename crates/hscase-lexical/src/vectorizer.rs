//! Character n-gram TF-IDF vectorizer.
//!
//! Spans of 2–4 characters are extracted without word tokenization, which
//! keeps compound words and mixed-script text matchable. Global noise is
//! filtered by document frequency: spans seen in fewer than 2 documents or
//! in more than 85% of documents are dropped, and the vocabulary is capped
//! at the most frequent surviving spans.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const NGRAM_MIN: usize = 2;
pub const NGRAM_MAX: usize = 4;
pub const MIN_DF: usize = 2;
pub const MAX_DF_RATIO: f64 = 0.85;
pub const MAX_FEATURES: usize = 20_000;

/// A sparse feature vector: `(column, weight)` pairs sorted by column.
pub type SparseVec = Vec<(u32, f32)>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NgramVectorizer {
    vocab: HashMap<String, u32>,
    idf: Vec<f32>,
}

fn ngram_counts(text: &str) -> HashMap<String, u32> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let mut counts = HashMap::new();
    for n in NGRAM_MIN..=NGRAM_MAX {
        if chars.len() < n {
            break;
        }
        for window in chars.windows(n) {
            let gram: String = window.iter().collect();
            *counts.entry(gram).or_insert(0) += 1;
        }
    }
    counts
}

impl NgramVectorizer {
    /// Fit the vocabulary and IDF weights over one corpus snapshot.
    pub fn fit(texts: &[&str]) -> Self {
        let n_docs = texts.len();
        // document frequency and corpus-wide term count per n-gram
        let mut stats: HashMap<String, (usize, u64)> = HashMap::new();
        for text in texts {
            for (gram, tf) in ngram_counts(text) {
                let entry = stats.entry(gram).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += u64::from(tf);
            }
        }

        let max_df = MAX_DF_RATIO * n_docs as f64;
        let mut survivors: Vec<(String, usize, u64)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= MIN_DF && (*df as f64) <= max_df)
            .map(|(gram, (df, total))| (gram, df, total))
            .collect();

        // cap the vocabulary at the most frequent spans; ties resolved
        // lexically so a rebuild is deterministic
        survivors.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        survivors.truncate(MAX_FEATURES);
        survivors.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocab = HashMap::with_capacity(survivors.len());
        let mut idf = Vec::with_capacity(survivors.len());
        for (col, (gram, df, _)) in survivors.into_iter().enumerate() {
            vocab.insert(gram, col as u32);
            idf.push((((1 + n_docs) as f32) / ((1 + df) as f32)).ln() + 1.0);
        }
        Self { vocab, idf }
    }

    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Project a text into the fitted feature space: sublinear TF times
    /// smoothed IDF, L2-normalized. Unknown n-grams are ignored; a text
    /// with no known n-grams yields an empty vector.
    pub fn transform(&self, text: &str) -> SparseVec {
        let mut vec: SparseVec = ngram_counts(text)
            .into_iter()
            .filter_map(|(gram, tf)| {
                self.vocab.get(&gram).map(|&col| {
                    let w = (1.0 + (tf as f32).ln()) * self.idf[col as usize];
                    (col, w)
                })
            })
            .collect();
        vec.sort_by_key(|&(col, _)| col);

        let norm = vec.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vec {
                *w /= norm;
            }
        }
        vec
    }
}

/// Dot product of two column-sorted sparse vectors. Both sides are unit
/// vectors here, so this is cosine similarity.
pub fn sparse_dot(a: &[(u32, f32)], b: &[(u32, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngrams_cover_lengths_two_to_four() {
        let counts = ngram_counts("abcd");
        assert!(counts.contains_key("ab"));
        assert!(counts.contains_key("abc"));
        assert!(counts.contains_key("abcd"));
        assert!(!counts.contains_key("a"));
    }

    #[test]
    fn ngrams_are_unicode_aware() {
        let counts = ngram_counts("폴리우레탄");
        assert!(counts.contains_key("폴리"));
        assert!(counts.contains_key("우레탄"));
    }

    #[test]
    fn singleton_ngrams_are_filtered() {
        let v = NgramVectorizer::fit(&["alpha", "zebra"]);
        assert_eq!(v.vocab_len(), 0, "no n-gram repeats across documents");
        assert!(v.transform("alpha").is_empty());
    }

    #[test]
    fn transform_is_unit_length() {
        let v = NgramVectorizer::fit(&["plastic bottle", "plastic bag", "glass jar"]);
        let t = v.transform("plastic");
        assert!(!t.is_empty());
        let norm: f32 = t.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
