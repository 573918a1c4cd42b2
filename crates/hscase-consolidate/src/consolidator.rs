use tracing::{debug, info};

use hscase_core::types::{Candidate, Confidence, SourcePath};
use hscase_keyword::tokenize;

use crate::manual::{heading_codes, Manual};
use crate::tariff::TariffTable;

/// Weight applied to the tariff-name similarity of a Path A hit.
pub const TARIFF_WEIGHT: f32 = 0.4;
/// Weight applied to the fixed per-match increment of a Path B hit.
pub const MANUAL_WEIGHT: f32 = 0.6;
/// Path B yields a binary match rather than a continuous similarity, so
/// every hit contributes this fixed base score before weighting.
pub const DIRECT_MATCH_BASE: f32 = 0.5;

const PATH_A_TOP_N: usize = 15;
const PATH_A_LOOKUPS: usize = 10;
const PATH_B_TOP: usize = 10;
const MAX_CODES_PER_ENTRY: usize = 3;
const TOP_CANDIDATES: usize = 2;
const MIN_NAME_SIMILARITY: f32 = 0.1;

/// Path A evidence: a tariff-table name match chained into manual lookup.
#[derive(Debug, Clone)]
pub struct PathAHit {
    pub code: String,
    pub similarity: f32,
    pub tariff_name: String,
    pub manual_text: String,
}

/// Path B evidence: a manual entry matched directly by query tokens, with
/// the codes extracted from its heading.
#[derive(Debug, Clone)]
pub struct PathBHit {
    pub codes: Vec<String>,
    pub entry_text: String,
}

/// Outcome of a consolidation run. `NoCandidate` is an explicit "not
/// found" signal, distinct from an error and from a non-empty list.
#[derive(Debug)]
pub enum Consolidation {
    Candidates(Vec<Candidate>),
    NoCandidate,
}

impl Consolidation {
    pub fn candidates(&self) -> Option<&[Candidate]> {
        match self {
            Consolidation::Candidates(c) => Some(c),
            Consolidation::NoCandidate => None,
        }
    }
}

/// Runs both candidate-generation paths and fuses their scores.
pub struct DualPathConsolidator<'a> {
    tariff: &'a TariffTable,
    manual: &'a Manual,
}

impl<'a> DualPathConsolidator<'a> {
    pub fn new(tariff: &'a TariffTable, manual: &'a Manual) -> Self {
        Self { tariff, manual }
    }

    pub fn consolidate(&self, query: &str) -> Consolidation {
        let path_a = self.tariff_to_manual(query);
        let path_b = self.direct_manual(query);
        info!(
            path_a = path_a.len(),
            path_b = path_b.len(),
            "consolidating dual-path results"
        );
        fuse(&path_a, &path_b)
    }

    /// Path A: rank tariff entries by name similarity, then fetch each
    /// candidate code's manual content. Codes without manual content are
    /// skipped.
    fn tariff_to_manual(&self, query: &str) -> Vec<PathAHit> {
        let candidates = self.tariff.search(query, PATH_A_TOP_N, MIN_NAME_SIMILARITY);
        debug!(candidates = candidates.len(), "tariff table search done");

        candidates
            .into_iter()
            .take(PATH_A_LOOKUPS)
            .filter_map(|hit| {
                let content = self.manual.lookup(&hit.code);
                if content.is_empty() {
                    return None;
                }
                Some(PathAHit {
                    code: hit.code,
                    similarity: hit.similarity,
                    tariff_name: hit.name,
                    manual_text: content.rendered(),
                })
            })
            .collect()
    }

    /// Path B: match query tokens directly against manual entries and pull
    /// codes out of the matching entries' headings.
    fn direct_manual(&self, query: &str) -> Vec<PathBHit> {
        let mut tokens = tokenize(query);
        tokens.sort();
        tokens.dedup();
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &crate::manual::ManualEntry)> = self
            .manual
            .entries()
            .iter()
            .filter_map(|entry| {
                let full = format!("{} {} {}", entry.section, entry.heading, entry.text)
                    .to_lowercase();
                let matched = tokens.iter().filter(|t| full.contains(t.as_str())).count();
                (matched > 0).then_some((matched, entry))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(PATH_B_TOP);

        scored
            .into_iter()
            .filter_map(|(_, entry)| {
                let mut codes = heading_codes(&entry.heading);
                codes.truncate(MAX_CODES_PER_ENTRY);
                if codes.is_empty() {
                    return None;
                }
                Some(PathBHit { codes, entry_text: entry.text.clone() })
            })
            .collect()
    }
}

struct Accumulated {
    code: String,
    score: f32,
    from_a: bool,
    from_b: bool,
    tariff_name: String,
    manual_text: String,
}

/// Fuse the two evidence paths into at most two ranked candidates.
///
/// Path A contributes `similarity * 0.4` per hit; Path B contributes a
/// fixed `0.5 * 0.6` per code occurrence. Codes touched by both paths are
/// tagged HIGH, by exactly one MEDIUM. Ordering is stable: equal scores
/// keep Path-A-before-Path-B insertion order.
pub fn fuse(path_a: &[PathAHit], path_b: &[PathBHit]) -> Consolidation {
    let mut acc: Vec<Accumulated> = Vec::new();

    for hit in path_a {
        let score = hit.similarity * TARIFF_WEIGHT;
        match acc.iter_mut().find(|c| c.code == hit.code) {
            Some(existing) => {
                existing.score += score;
                existing.from_a = true;
            }
            None => acc.push(Accumulated {
                code: hit.code.clone(),
                score,
                from_a: true,
                from_b: false,
                tariff_name: hit.tariff_name.clone(),
                manual_text: hit.manual_text.clone(),
            }),
        }
    }

    for hit in path_b {
        for code in &hit.codes {
            let score = DIRECT_MATCH_BASE * MANUAL_WEIGHT;
            match acc.iter_mut().find(|c| c.code == *code) {
                Some(existing) => {
                    existing.score += score;
                    existing.from_b = true;
                }
                None => acc.push(Accumulated {
                    code: code.clone(),
                    score,
                    from_a: false,
                    from_b: true,
                    tariff_name: String::new(),
                    manual_text: hit.entry_text.clone(),
                }),
            }
        }
    }

    if acc.is_empty() {
        return Consolidation::NoCandidate;
    }

    acc.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    acc.truncate(TOP_CANDIDATES);

    let candidates = acc
        .into_iter()
        .map(|c| {
            let mut sources = Vec::new();
            if c.from_a {
                sources.push(SourcePath::TariffToManual);
            }
            if c.from_b {
                sources.push(SourcePath::DirectManual);
            }
            let confidence = if c.from_a && c.from_b {
                Confidence::High
            } else {
                Confidence::Medium
            };
            Candidate {
                hs_code: c.code,
                score: c.score,
                confidence,
                sources,
                tariff_name: c.tariff_name,
                manual_text: c.manual_text,
            }
        })
        .collect();
    Consolidation::Candidates(candidates)
}
