//! Prompt assembly for the map and reduce calls.
//!
//! The preamble texts are configuration values supplied by the host; the
//! engine only owns the structural assembly of context, partials, and the
//! user query.

use hscase_core::types::CaseRecord;

use crate::dispatch::Verdict;

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// System/context preamble for each per-group classification call.
    pub preamble: String,
    /// Preamble for the final aggregation call.
    pub aggregate_preamble: String,
    /// Human-readable label of the corpus variant, e.g. "domestic".
    pub source_label: String,
}

impl PromptTemplate {
    pub fn render_group(&self, group_id: usize, context: &str, query: &str) -> String {
        format!(
            "{}\n\nRelevant cases ({}, group {}):\n{}\n\nUser: {}\n",
            self.preamble,
            self.source_label,
            group_id + 1,
            context,
            query
        )
    }

    pub fn render_aggregate(&self, partials: &[Verdict], query: &str) -> String {
        let mut prompt = format!(
            "{}\n\nBelow are the analyses of {} record groups. Synthesize them into one final expert answer.\n\n",
            self.aggregate_preamble,
            partials.len()
        );
        for verdict in partials {
            prompt.push_str(&format!("[Group {} answer]\n{}\n\n", verdict.group_id + 1, verdict.text));
        }
        prompt.push_str(&format!("User: {query}\n"));
        prompt
    }
}

/// Render one group's records into prompt context.
pub fn render_context(records: &[&CaseRecord]) -> String {
    if records.is_empty() {
        return "No similar cases in this group.".to_string();
    }
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "- [{}] code {}: {} | {} | {} ({}, {})\n",
            record.reference_id,
            record.hs_code,
            record.product_name,
            record.description,
            record.decision_reason,
            record.authority,
            record.decision_date
        ));
    }
    out
}
