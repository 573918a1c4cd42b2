use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use hscase_core::types::{DocId, Document};
use hscase_lexical::LexicalIndex;

/// One row of the canonical code↔name table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TariffEntry {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_alt: String,
}

#[derive(Debug, Clone)]
pub struct TariffHit {
    pub code: String,
    pub similarity: f32,
    pub name: String,
}

/// The tariff table with its own small n-gram index over entry names.
pub struct TariffTable {
    entries: Vec<TariffEntry>,
    index: LexicalIndex,
}

impl TariffTable {
    /// Load from a JSON array; a missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "tariff table missing, treating as empty");
            return Ok(Self::from_entries(Vec::new()));
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let entries: Vec<TariffEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<TariffEntry>) -> Self {
        let documents: Vec<Document> = entries
            .iter()
            .enumerate()
            .map(|(ordinal, entry)| Document {
                id: DocId { source: "tariff".to_string(), ordinal },
                text: format!("{} {}", entry.name, entry.name_alt),
            })
            .collect();
        let index = LexicalIndex::build(&documents);
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank entries by name similarity to the query.
    pub fn search(&self, query: &str, top_n: usize, min_similarity: f32) -> Vec<TariffHit> {
        self.index
            .search(query, top_n, min_similarity)
            .into_iter()
            .filter_map(|hit| {
                self.entries.get(hit.id.ordinal).map(|entry| TariffHit {
                    code: entry.code.clone(),
                    similarity: hit.score,
                    name: entry.name.clone(),
                })
            })
            .collect()
    }
}
