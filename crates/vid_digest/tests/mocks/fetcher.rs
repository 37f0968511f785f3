use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use vid_digest::{FetchError, MediaFetcher};

/// Writes a fake `<id>.wav` into the output directory so cleanup behavior is
/// observable, and records every `(url, id)` pair it was asked to fetch.
#[derive(Clone)]
pub struct MockFetcher {
    pub output_dir: PathBuf,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockFetcher {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(output_dir: impl Into<PathBuf>, msg: &str) -> Self {
        Self {
            output_dir: output_dir.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl MediaFetcher for MockFetcher {
    async fn fetch(&self, url: &str, id: &str) -> Result<PathBuf, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), id.to_string()));

        if let Some(ref msg) = self.fail_with {
            return Err(FetchError::CommandFailed {
                status: 1,
                stderr: msg.clone(),
            });
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{id}.wav"));
        std::fs::write(&path, b"RIFF fake audio")?;
        Ok(path)
    }
}
