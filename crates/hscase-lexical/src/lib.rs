//! hscase-lexical
//!
//! Character n-gram TF-IDF indexing and cosine search over a corpus
//! snapshot, plus the persisted index cache. The index is a batch-built,
//! read-only artifact; any corpus change means a full rebuild.

pub mod cache;
pub mod index;
pub mod vectorizer;

pub use index::LexicalIndex;
pub use vectorizer::NgramVectorizer;
