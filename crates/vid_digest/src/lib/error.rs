use std::path::PathBuf;

/// Audio acquisition failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to spawn yt-dlp: {0}")]
    Io(#[from] std::io::Error),
    #[error("yt-dlp exited with status {status}: {stderr}")]
    CommandFailed { status: i32, stderr: String },
    #[error("yt-dlp did not produce expected file: {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Failures of either local model (speech-to-text or summarization).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to load model: {0}")]
    Load(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Summarization engine failures. Per-chunk model errors are absorbed into
/// degraded output and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("input text is empty")]
    EmptyInput,
    #[error(transparent)]
    Model(#[from] ModelError),
}
