mod chunker;
mod engine;
mod error;
mod pipeline;
pub mod llm;
pub mod tracing;
pub mod yt;

pub use chunker::split_into_chunks;
pub use engine::{SummarizationEngine, SummaryBounds};
pub use error::{FetchError, ModelError, SummarizeError};
pub use llm::{SpeechModel, SummarizationModel};
pub use pipeline::{builder::PipelineBuilder, Pipeline, SummaryResult};
pub use yt::MediaFetcher;
