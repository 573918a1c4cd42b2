//! hscase-keyword
//!
//! Deterministic token matching over a case store: OR-token substring
//! scoring, exact reference-id lookup, and partial code lookup. No
//! similarity index involved; this is the fallback/direct-citation path.

pub mod matcher;

pub use matcher::{tokenize, KeywordMatcher, KeywordOptions};
