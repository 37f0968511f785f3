use std::sync::{Arc, Mutex};

use vid_digest::{ModelError, SummarizationModel};

/// Records `(input_chars, max_length, min_length)` per call.
#[derive(Clone)]
pub struct MockSummarizationModel {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<(usize, usize, usize)>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizationModel {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl SummarizationModel for MockSummarizationModel {
    async fn infer(
        &mut self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.len(), max_length, min_length));
        if let Some(ref msg) = self.fail_with {
            return Err(ModelError::Inference(msg.clone()));
        }
        Ok(self.summary.clone())
    }
}
