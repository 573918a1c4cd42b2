//! Persisted index cache.
//!
//! One zstd-compressed bincode blob per corpus partition. The blob carries
//! a fingerprint of the indexed documents; a mismatch (changed corpus, old
//! cache file) or an unreadable blob triggers a full rebuild with
//! write-through.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::hash::Hasher;
use std::path::Path;
use tracing::{info, warn};
use twox_hash::XxHash64;

use hscase_core::types::Document;

use crate::index::LexicalIndex;

#[derive(Serialize, Deserialize)]
struct CacheBlob {
    fingerprint: u64,
    index: LexicalIndex,
}

/// Order-sensitive hash of the corpus snapshot the index was built from.
pub fn fingerprint(documents: &[Document]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write_usize(documents.len());
    for doc in documents {
        hasher.write(doc.id.source.as_bytes());
        hasher.write_usize(doc.id.ordinal);
        hasher.write(doc.text.as_bytes());
    }
    hasher.finish()
}

pub fn save(path: &Path, index: &LexicalIndex, fingerprint: u64) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create index cache {}", path.display()))?;
    let mut encoder = zstd::stream::write::Encoder::new(file, 3)?;
    let blob = CacheBlob { fingerprint, index: index.clone() };
    bincode::serialize_into(&mut encoder, &blob)?;
    encoder.finish()?;
    Ok(())
}

/// Load a cached index, returning `None` when the file is absent, corrupt,
/// or built from a different corpus snapshot.
pub fn load(path: &Path, expected_fingerprint: u64) -> Option<LexicalIndex> {
    let file = File::open(path).ok()?;
    let decoder = match zstd::stream::read::Decoder::new(file) {
        Ok(d) => d,
        Err(e) => {
            warn!(path = %path.display(), "index cache unreadable: {e}");
            return None;
        }
    };
    let blob: CacheBlob = match bincode::deserialize_from(decoder) {
        Ok(b) => b,
        Err(e) => {
            warn!(path = %path.display(), "index cache corrupt, rebuilding: {e}");
            return None;
        }
    };
    if blob.fingerprint != expected_fingerprint {
        warn!(path = %path.display(), "index cache stale, rebuilding");
        return None;
    }
    Some(blob.index)
}

/// Load the cache when present and fresh, otherwise rebuild from
/// `documents` and write through. A failed write is logged, not fatal.
pub fn load_or_build(path: &Path, documents: &[Document]) -> Result<LexicalIndex> {
    let fp = fingerprint(documents);
    if let Some(index) = load(path, fp) {
        info!(path = %path.display(), docs = index.len(), "index cache hit");
        return Ok(index);
    }
    let index = LexicalIndex::build(documents);
    if let Err(e) = save(path, &index, fp) {
        warn!(path = %path.display(), "failed to write index cache: {e}");
    }
    Ok(index)
}
