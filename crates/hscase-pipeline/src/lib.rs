//! hscase-pipeline
//!
//! The map-reduce half of the engine: slice a ranked evidence pool into
//! groups, classify each group through the external oracle under a bounded
//! worker pool, and reduce the partial verdicts into one final answer.
//! One parameterized [`pipeline::CasePipeline`] serves every corpus
//! variant.

pub mod aggregate;
pub mod dispatch;
pub mod oracle;
pub mod partition;
pub mod pipeline;
pub mod prompt;
pub mod retry;

pub use dispatch::{Dispatcher, Verdict};
pub use oracle::HttpOracle;
pub use partition::{partition, GROUP_COUNT};
pub use pipeline::{CasePipeline, PipelineOutcome};
pub use prompt::PromptTemplate;
pub use retry::RetryPolicy;
