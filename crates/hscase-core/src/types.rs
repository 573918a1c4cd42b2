//! Domain types shared by the retrieval engines and the classification
//! pipeline.

use serde::{Deserialize, Serialize};

/// One historical classification precedent as supplied by the corpus loader.
///
/// Records are opaque to the engines apart from the fields concatenated into
/// searchable text (`product_name`, `description`, `decision_reason`) and
/// the identifier fields used for direct lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub decision_reason: String,
    #[serde(default)]
    pub hs_code: String,
    #[serde(default)]
    pub reference_id: String,
    #[serde(default)]
    pub decision_date: String,
    #[serde(default)]
    pub authority: String,
}

/// Stable identity of an indexed document: the source file label plus the
/// record's ordinal within the loaded store. Assigned once at corpus load;
/// search results carry ids, never record blobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocId {
    pub source: String,
    pub ordinal: usize,
}

/// A retrievable unit: the concatenated semantic text of one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

/// The minimal surface returned by both retrieval engines.
///
/// `score` is engine-specific but higher is always better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: DocId,
    pub score: f32,
}

/// Which consolidation path produced evidence for a candidate code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourcePath {
    TariffToManual,
    DirectManual,
}

/// How many independent evidence paths support a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

/// A consolidated candidate classification code, ready for prompt
/// construction downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub hs_code: String,
    pub score: f32,
    pub confidence: Confidence,
    pub sources: Vec<SourcePath>,
    pub tariff_name: String,
    pub manual_text: String,
}
