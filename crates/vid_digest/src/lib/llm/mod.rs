pub mod t5;
pub mod whisper;

use std::future::Future;
use std::path::Path;

use crate::error::ModelError;

/// Speech-to-text model. Loading is lazy: the first `transcribe` call pays
/// the model initialization cost, subsequent calls reuse it.
pub trait SpeechModel {
    fn transcribe(
        &mut self,
        audio_path: &Path,
    ) -> impl Future<Output = Result<String, ModelError>>;
}

/// Single-shot abstractive summarization model. `max_length` and `min_length`
/// bound the output in the model's native length unit (tokens); decoding is
/// greedy, so output is deterministic for a given input.
pub trait SummarizationModel {
    fn infer(
        &mut self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> impl Future<Output = Result<String, ModelError>>;
}
