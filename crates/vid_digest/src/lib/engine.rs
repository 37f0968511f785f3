use crate::chunker::split_into_chunks;
use crate::error::{ModelError, SummarizeError};
use crate::llm::SummarizationModel;

/// Target summary size, in the summarization model's token units.
#[derive(Debug, Clone, Copy)]
pub struct SummaryBounds {
    pub max_length: usize,
    pub min_length: usize,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            max_length: 142,
            min_length: 56,
        }
    }
}

/// Produces a bounded-length summary for arbitrarily long input by chunking
/// the text at sentence boundaries, summarizing each chunk with scaled-down
/// bounds, and re-summarizing the combination when it is still too long.
pub struct SummarizationEngine<M> {
    model: M,
}

/// Per-chunk bounds divide the overall bounds by the chunk count, with small
/// additive margins so tiny quotients stay usable. The max bound is kept
/// positive and the min bound strictly below it.
fn per_chunk_bounds(max_length: usize, min_length: usize, chunk_count: usize) -> (usize, usize) {
    let n = chunk_count.max(1);
    let max = (max_length / n + 50).max(1);
    let min = (min_length / n + 10).min(max.saturating_sub(1));
    (max, min)
}

impl<M: SummarizationModel> SummarizationEngine<M> {
    /// Inputs at or under this many characters go to the model in one call.
    pub const SHORT_TEXT_CUTOFF: usize = 1024;
    /// Character budget per chunk on the long-text path.
    pub const CHUNK_CHAR_BUDGET: usize = 800;
    /// Characters of the original chunk kept when its summarization fails.
    const DEGRADED_PREFIX_CHARS: usize = 200;

    pub fn new(model: M) -> Self {
        Self { model }
    }

    #[tracing::instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn summarize(
        &mut self,
        text: &str,
        bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        // The cutoff and chunk budget are measured in characters.
        if text.chars().count() <= Self::SHORT_TEXT_CUTOFF {
            let summary = self
                .model
                .infer(text, bounds.max_length, bounds.min_length)
                .await?;
            return Ok(summary.trim().to_string());
        }

        let chunks = split_into_chunks(text, Self::CHUNK_CHAR_BUDGET);
        let total = chunks.len();
        let (chunk_max, chunk_min) =
            per_chunk_bounds(bounds.max_length, bounds.min_length, total);
        tracing::info!(chunks = total, chunk_max, chunk_min, "Summarizing long text in chunks");

        let mut parts = Vec::with_capacity(total);
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!(chunk = i + 1, total, "Summarizing chunk");
            match self.model.infer(chunk, chunk_max, chunk_min).await {
                Ok(summary) => parts.push(summary.trim().to_string()),
                // A model that cannot load at all is fatal for the whole
                // operation, not a per-chunk soft failure.
                Err(e @ ModelError::Load(_)) => return Err(e.into()),
                Err(e) => {
                    // A single bad chunk never aborts the batch; substitute
                    // a truncated prefix and keep going.
                    tracing::warn!(chunk = i + 1, total, error = %e, "Chunk summarization failed, substituting prefix");
                    parts.push(degraded_placeholder(chunk, Self::DEGRADED_PREFIX_CHARS));
                }
            }
        }

        let combined = parts.join(" ");

        let combined_chars = combined.chars().count();
        if combined_chars > Self::SHORT_TEXT_CUTOFF {
            tracing::info!(chars = combined_chars, "Combined summary still too long, summarizing again");
            let summary = self
                .model
                .infer(&combined, bounds.max_length, bounds.min_length)
                .await?;
            return Ok(summary.trim().to_string());
        }

        Ok(combined.trim().to_string())
    }
}

fn degraded_placeholder(chunk: &str, prefix_chars: usize) -> String {
    let prefix: String = chunk.chars().take(prefix_chars).collect();
    format!("{prefix}...")
}
