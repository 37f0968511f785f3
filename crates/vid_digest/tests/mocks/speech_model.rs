use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use vid_digest::{ModelError, SpeechModel};

#[derive(Clone)]
pub struct MockSpeechModel {
    pub transcript: String,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
}

impl MockSpeechModel {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            transcript: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl SpeechModel for MockSpeechModel {
    async fn transcribe(&mut self, audio_path: &Path) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(audio_path.to_path_buf());
        if let Some(ref msg) = self.fail_with {
            return Err(ModelError::Inference(msg.clone()));
        }
        Ok(self.transcript.clone())
    }
}
