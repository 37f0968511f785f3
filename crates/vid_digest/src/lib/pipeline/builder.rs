use std::path::PathBuf;

use crate::engine::{SummarizationEngine, SummaryBounds};
use crate::llm::{SpeechModel, SummarizationModel};
use crate::pipeline::Pipeline;
use crate::yt::MediaFetcher;

/// Typestate builder for [`Pipeline`]: each collaborator slot starts as `()`
/// and `build` is only available once all three are set.
pub struct PipelineBuilder<F = (), T = (), S = ()> {
    output_dir: PathBuf,
    fetcher: F,
    speech: T,
    summarization: S,
    bounds: SummaryBounds,
    cleanup: bool,
    transcript_only: bool,
}

impl PipelineBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            fetcher: (),
            speech: (),
            summarization: (),
            bounds: SummaryBounds::default(),
            cleanup: true,
            transcript_only: false,
        }
    }
}

impl<F, T, S> PipelineBuilder<F, T, S> {
    pub fn fetcher<F2: MediaFetcher>(self, fetcher: F2) -> PipelineBuilder<F2, T, S> {
        PipelineBuilder {
            output_dir: self.output_dir,
            fetcher,
            speech: self.speech,
            summarization: self.summarization,
            bounds: self.bounds,
            cleanup: self.cleanup,
            transcript_only: self.transcript_only,
        }
    }

    pub fn speech_model<T2: SpeechModel>(self, speech: T2) -> PipelineBuilder<F, T2, S> {
        PipelineBuilder {
            output_dir: self.output_dir,
            fetcher: self.fetcher,
            speech,
            summarization: self.summarization,
            bounds: self.bounds,
            cleanup: self.cleanup,
            transcript_only: self.transcript_only,
        }
    }

    pub fn summarization_model<S2: SummarizationModel>(
        self,
        summarization: S2,
    ) -> PipelineBuilder<F, T, S2> {
        PipelineBuilder {
            output_dir: self.output_dir,
            fetcher: self.fetcher,
            speech: self.speech,
            summarization,
            bounds: self.bounds,
            cleanup: self.cleanup,
            transcript_only: self.transcript_only,
        }
    }

    pub fn summary_bounds(mut self, bounds: SummaryBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn transcript_only(mut self, transcript_only: bool) -> Self {
        self.transcript_only = transcript_only;
        self
    }
}

impl<F, T, S> PipelineBuilder<F, T, S>
where
    F: MediaFetcher,
    T: SpeechModel,
    S: SummarizationModel,
{
    pub fn build(self) -> Pipeline<F, T, S> {
        Pipeline {
            output_dir: self.output_dir,
            fetcher: self.fetcher,
            speech: self.speech,
            engine: SummarizationEngine::new(self.summarization),
            bounds: self.bounds,
            cleanup: self.cleanup,
            transcript_only: self.transcript_only,
        }
    }
}
