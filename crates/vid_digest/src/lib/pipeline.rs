pub mod builder;

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::engine::{SummarizationEngine, SummaryBounds};
use crate::llm::{SpeechModel, SummarizationModel};
use crate::yt::{video_id, MediaFetcher};

/// Outcome of one end-to-end pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub url: String,
    pub transcript: String,
    pub summary: String,
}

/// Pipeline stages, in execution order. A failure in any stage aborts the
/// run; both outcomes funnel through the same cleanup action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Fetching,
    Transcribing,
    Summarizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetching => write!(f, "fetching"),
            Stage::Transcribing => write!(f, "transcribing"),
            Stage::Summarizing => write!(f, "summarizing"),
        }
    }
}

/// Drives one video through fetch → transcribe → summarize.
///
/// Each stage blocks until complete; a stage failure aborts the run and the
/// downloaded audio is removed either way (unless cleanup is disabled).
pub struct Pipeline<F, T, S>
where
    F: MediaFetcher,
    T: SpeechModel,
    S: SummarizationModel,
{
    output_dir: PathBuf,
    fetcher: F,
    speech: T,
    engine: SummarizationEngine<S>,
    bounds: SummaryBounds,
    cleanup: bool,
    transcript_only: bool,
}

impl<F, T, S> Pipeline<F, T, S>
where
    F: MediaFetcher,
    T: SpeechModel,
    S: SummarizationModel,
{
    #[tracing::instrument(skip(self))]
    pub async fn run(&mut self, url: &str) -> anyhow::Result<SummaryResult> {
        let id = video_id(url);
        tracing::info!(id = %id, "Starting pipeline run");

        let outcome = self.execute(url, &id).await;
        match &outcome {
            Ok(_) => tracing::info!(id = %id, "Pipeline run complete"),
            Err(e) => tracing::error!(id = %id, error = ?e, "Pipeline run aborted"),
        }

        // Single cleanup point for both terminal states. A cleanup failure
        // is logged and never replaces the run's outcome.
        self.cleanup_audio(&id);

        outcome
    }

    async fn execute(&mut self, url: &str, id: &str) -> anyhow::Result<SummaryResult> {
        tracing::info!(stage = %Stage::Fetching, "Downloading audio");
        let audio_path = self
            .fetcher
            .fetch(url, id)
            .await
            .context("Failed to download audio")?;

        tracing::info!(stage = %Stage::Transcribing, audio = %audio_path.display(), "Transcribing audio");
        let transcript = self
            .speech
            .transcribe(&audio_path)
            .await
            .context("Failed to transcribe audio")?;

        if transcript.trim().is_empty() {
            tracing::warn!("Transcript empty, skipping summarization");
            return Ok(SummaryResult {
                url: url.to_string(),
                transcript,
                summary: String::new(),
            });
        }

        if self.transcript_only {
            tracing::info!("Transcript-only run, skipping summarization");
            return Ok(SummaryResult {
                url: url.to_string(),
                transcript,
                summary: String::new(),
            });
        }

        tracing::info!(stage = %Stage::Summarizing, chars = transcript.chars().count(), "Summarizing transcript");
        let summary = self
            .engine
            .summarize(&transcript, self.bounds)
            .await
            .context("Failed to summarize transcript")?;

        Ok(SummaryResult {
            url: url.to_string(),
            transcript,
            summary,
        })
    }

    /// Removes every `<id>.*` file from the output directory, covering the
    /// downloaded audio and any partially-written leftovers from a failed
    /// fetch.
    fn cleanup_audio(&self, id: &str) {
        if !self.cleanup {
            tracing::debug!(id = %id, "Cleanup disabled, keeping audio files");
            return;
        }

        let entries = match std::fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(_) => return, // nothing was ever written
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let matches = path.is_file()
                && path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| stem == id);
            if !matches {
                continue;
            }
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(error = ?e, path = ?path, "Failed to clean up audio file");
            } else {
                tracing::info!(path = ?path, "Cleaned up audio file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_result_serializes_to_json() {
        let result = SummaryResult {
            url: "https://youtu.be/abc123XYZ0".to_string(),
            transcript: "the transcript".to_string(),
            summary: "the summary".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""url":"https://youtu.be/abc123XYZ0""#));
        assert!(json.contains(r#""transcript":"the transcript""#));
        assert!(json.contains(r#""summary":"the summary""#));
    }
}
