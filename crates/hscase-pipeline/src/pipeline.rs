//! The parameterized retrieve → partition → classify → aggregate pipeline.
//!
//! One `CasePipeline` value serves every corpus variant; variants differ
//! only in their store/index pair and their prompt template.

use tracing::info;

use hscase_core::corpus::CaseStore;
use hscase_core::traits::CaseSearcher;
use hscase_core::types::CaseRecord;

use crate::aggregate::aggregate;
use crate::dispatch::{Dispatcher, Verdict};
use crate::partition::{partition, GROUP_COUNT};
use crate::prompt::{render_context, PromptTemplate};

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub final_verdict: String,
    pub partials: Vec<Verdict>,
    pub retrieved: usize,
}

pub struct CasePipeline {
    dispatcher: Dispatcher,
    template: PromptTemplate,
    top_k: usize,
    min_similarity: f32,
    group_count: usize,
}

impl CasePipeline {
    pub fn new(dispatcher: Dispatcher, template: PromptTemplate) -> Self {
        Self {
            dispatcher,
            template,
            top_k: hscase_lexical::index::DEFAULT_TOP_K,
            min_similarity: hscase_lexical::index::DEFAULT_MIN_SIMILARITY,
            group_count: GROUP_COUNT,
        }
    }

    pub fn with_breadth(mut self, top_k: usize, min_similarity: f32) -> Self {
        self.top_k = top_k;
        self.min_similarity = min_similarity;
        self
    }

    /// Run the full map-reduce pass for one query against one corpus
    /// partition.
    pub async fn run(
        &self,
        store: &CaseStore,
        index: &dyn CaseSearcher,
        query: &str,
    ) -> PipelineOutcome {
        let hits = index.search(query, self.top_k, self.min_similarity);
        let records: Vec<&CaseRecord> =
            hits.iter().filter_map(|hit| store.record(&hit.id)).collect();
        info!(
            corpus = self.template.source_label.as_str(),
            retrieved = records.len(),
            "ranked pool retrieved"
        );

        let groups = partition(&records, self.group_count);
        let prompts: Vec<String> = groups
            .iter()
            .enumerate()
            .map(|(group_id, group)| {
                self.template.render_group(group_id, &render_context(group), query)
            })
            .collect();

        let partials = self.dispatcher.dispatch(prompts).await;

        let final_prompt = self.template.render_aggregate(&partials, query);
        let oracle = self.dispatcher.oracle();
        let final_verdict =
            aggregate(&*oracle, self.dispatcher.retry(), &final_prompt, &partials).await;

        PipelineOutcome {
            final_verdict,
            partials,
            retrieved: records.len(),
        }
    }
}
