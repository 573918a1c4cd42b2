//! Corpus loading and the arena-style case store.
//!
//! Each corpus partition is a fixed list of JSON source files. A missing
//! file is an empty source (warning, not a startup failure); malformed JSON
//! is a real error. Records are loaded once into a flat arena and addressed
//! by stable [`DocId`]s from then on.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::types::{CaseRecord, DocId, Document};

/// Which corpus partition a store holds. Each partition gets its own
/// index and its own classification pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusKind {
    Domestic,
    Overseas,
}

impl CorpusKind {
    /// The JSON source files making up this partition, in load order.
    pub fn source_files(self) -> &'static [&'static str] {
        match self {
            CorpusKind::Domestic => &[
                "cases_part1.json",
                "cases_part2.json",
                "cases_part3.json",
                "cases_part4.json",
                "cases_part5.json",
                "cases_part6.json",
                "cases_part7.json",
                "cases_part8.json",
                "cases_part9.json",
                "cases_part10.json",
                "committee.json",
                "council.json",
            ],
            CorpusKind::Overseas => &["cases_us.json", "cases_eu.json"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CorpusKind::Domestic => "domestic",
            CorpusKind::Overseas => "overseas",
        }
    }
}

/// Flat arena of case records for one corpus partition.
///
/// `sources` parallels `records` and carries the originating file label for
/// each record; a record's store-wide index is its `DocId::ordinal`.
#[derive(Debug)]
pub struct CaseStore {
    kind: CorpusKind,
    records: Vec<CaseRecord>,
    sources: Vec<String>,
}

impl CaseStore {
    /// Load a partition from `data_dir`. Missing source files contribute
    /// zero records.
    pub fn load(kind: CorpusKind, data_dir: &Path) -> Result<Self> {
        let mut records = Vec::new();
        let mut sources = Vec::new();
        for file in kind.source_files() {
            let path = data_dir.join(file);
            if !path.exists() {
                warn!(source = *file, "corpus source missing, treating as empty");
                continue;
            }
            let raw = fs::read_to_string(&path)
                .map_err(|e| Error::Corpus(format!("failed to read {}: {e}", path.display())))?;
            let parsed: Vec<CaseRecord> = serde_json::from_str(&raw)
                .map_err(|e| Error::Corpus(format!("failed to parse {}: {e}", path.display())))?;
            let label = file.trim_end_matches(".json");
            for record in parsed {
                records.push(record);
                sources.push(label.to_string());
            }
        }
        info!(
            corpus = kind.label(),
            records = records.len(),
            "corpus partition loaded"
        );
        Ok(Self { kind, records, sources })
    }

    /// Build a store directly from labeled record batches. Used by tests
    /// and by embedders of pre-parsed data.
    pub fn from_records(kind: CorpusKind, batches: Vec<(String, Vec<CaseRecord>)>) -> Self {
        let mut records = Vec::new();
        let mut sources = Vec::new();
        for (label, batch) in batches {
            for record in batch {
                records.push(record);
                sources.push(label.clone());
            }
        }
        Self { kind, records, sources }
    }

    pub fn kind(&self) -> CorpusKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn doc_id(&self, ordinal: usize) -> Option<DocId> {
        self.sources.get(ordinal).map(|source| DocId {
            source: source.clone(),
            ordinal,
        })
    }

    pub fn record(&self, id: &DocId) -> Option<&CaseRecord> {
        self.records.get(id.ordinal)
    }

    /// Concatenate each record's semantic fields into an indexable
    /// document. Records whose concatenation is blank are skipped.
    pub fn documents(&self) -> Vec<Document> {
        let mut docs = Vec::with_capacity(self.records.len());
        for (ordinal, record) in self.records.iter().enumerate() {
            let text = [
                record.product_name.as_str(),
                record.description.as_str(),
                record.decision_reason.as_str(),
            ]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
            if text.trim().is_empty() {
                continue;
            }
            docs.push(Document {
                id: DocId {
                    source: self.sources[ordinal].clone(),
                    ordinal,
                },
                text,
            });
        }
        docs
    }
}
