use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::FetchError;
use crate::yt::MediaFetcher;

/// Downloads video audio by shelling out to the `yt-dlp` binary, extracting
/// a 16 kHz mono WAV that the speech model can consume directly.
pub struct YtDlpFetcher {
    output_dir: PathBuf,
}

impl YtDlpFetcher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Any `<id>.*` file the postprocessor produced, when the expected WAV
    /// name is absent.
    fn find_downloaded(&self, id: &str) -> Option<PathBuf> {
        let entries = std::fs::read_dir(&self.output_dir).ok()?;
        entries
            .flatten()
            .map(|entry| entry.path())
            .find(|path| {
                path.is_file()
                    && path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .is_some_and(|stem| stem == id)
            })
    }
}

impl MediaFetcher for YtDlpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, url: &str, id: &str) -> Result<PathBuf, FetchError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let output_template = self.output_dir.join(format!("{id}.%(ext)s"));
        let expected_wav = self.output_dir.join(format!("{id}.wav"));

        if expected_wav.exists() {
            tracing::debug!("Audio already exists at {}", expected_wav.display());
            return Ok(expected_wav);
        }

        tracing::info!("Downloading audio from {url}");
        let output = Command::new("yt-dlp")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--extract-audio")
            .args(["--audio-format", "wav"])
            // whisper wants 16 kHz mono input
            .args(["--postprocessor-args", "ffmpeg:-ar 16000 -ac 1"])
            .arg("--output")
            .arg(&output_template)
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if expected_wav.exists() {
            tracing::info!("Audio downloaded to {}", expected_wav.display());
            return Ok(expected_wav);
        }

        match self.find_downloaded(id) {
            Some(path) => {
                tracing::info!("Audio downloaded to {}", path.display());
                Ok(path)
            }
            None => Err(FetchError::MissingOutput(expected_wav)),
        }
    }
}
