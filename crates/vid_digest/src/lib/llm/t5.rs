//! Abstractive summarization with a quantized T5 model running locally via
//! candle. Model artifacts are resolved through the HuggingFace hub cache on
//! first use, then the loaded model is reused for every call.

use candle_core::{Device, Tensor};
use candle_transformers::models::quantized_t5::{Config as T5Config, T5ForConditionalGeneration};
use candle_transformers::quantized_var_builder::VarBuilder;
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

use crate::error::ModelError;
use crate::llm::SummarizationModel;

const MODEL_FILENAME: &str = "model.gguf";
const CONFIG_FILENAME: &str = "config.json";
const TOKENIZER_FILENAME: &str = "tokenizer.json";

/// T5 decoder start token (pad) and end-of-sequence token ids.
const PAD_TOKEN: u32 = 0;
const EOS_TOKEN: u32 = 1;

pub struct T5SummarizationModel {
    repo: String,
    loaded: Option<LoadedT5>,
}

struct LoadedT5 {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
}

impl T5SummarizationModel {
    /// Default quantized T5 weights on the HuggingFace hub.
    pub const DEFAULT_REPO: &'static str = "lmz/candle-quantized-t5";

    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            loaded: None,
        }
    }

    fn load_model(repo_name: &str) -> Result<LoadedT5, ModelError> {
        tracing::info!(model = repo_name, "Loading summarization model (this may take a while)");
        let device = Device::Cpu;

        let api = Api::new().map_err(|e| ModelError::Load(format!("HF hub API init: {e}")))?;
        let repo = api.model(repo_name.to_string());

        let model_path = repo
            .get(MODEL_FILENAME)
            .map_err(|e| ModelError::Load(format!("download {MODEL_FILENAME}: {e}")))?;
        let config_path = repo
            .get(CONFIG_FILENAME)
            .map_err(|e| ModelError::Load(format!("download {CONFIG_FILENAME}: {e}")))?;
        let tokenizer_path = repo
            .get(TOKENIZER_FILENAME)
            .map_err(|e| ModelError::Load(format!("download {TOKENIZER_FILENAME}: {e}")))?;

        let config_bytes = std::fs::read(&config_path)
            .map_err(|e| ModelError::Load(format!("read config {}: {e}", config_path.display())))?;
        let config: T5Config = serde_json::from_slice(&config_bytes)
            .map_err(|e| ModelError::Load(format!("parse T5 config: {e}")))?;

        let vb = VarBuilder::from_gguf(&model_path, &device)
            .map_err(|e| ModelError::Load(format!("load GGUF {}: {e}", model_path.display())))?;
        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| ModelError::Load(format!("init T5 model: {e}")))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::Load(format!("load tokenizer: {e}")))?;

        tracing::info!("Summarization model loaded");
        Ok(LoadedT5 {
            model,
            tokenizer,
            device,
        })
    }
}

impl SummarizationModel for T5SummarizationModel {
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn infer(
        &mut self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, ModelError> {
        if self.loaded.is_none() {
            self.loaded = Some(Self::load_model(&self.repo)?);
        }
        let Some(loaded) = self.loaded.as_mut() else {
            return Err(ModelError::Load("summarization model unavailable".into()));
        };
        loaded.generate(text, max_length, min_length)
    }
}

impl LoadedT5 {
    /// Greedy decoding with an incremental KV cache. `max_length` caps the
    /// generated token count; the EOS logit is suppressed until `min_length`
    /// tokens are out. No sampling, so output is deterministic.
    fn generate(
        &mut self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<String, ModelError> {
        self.model.clear_kv_cache();

        let prompt = format!("summarize: {text}");
        let encoding = self
            .tokenizer
            .encode(prompt.as_str(), true)
            .map_err(|e| ModelError::Inference(format!("tokenize: {e}")))?;
        let input_ids: Vec<u32> = encoding.get_ids().to_vec();

        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| ModelError::Inference(format!("input tensor: {e}")))?;
        let encoder_output = self
            .model
            .encode(&input_tensor)
            .map_err(|e| ModelError::Inference(format!("encoder forward: {e}")))?;

        // First step feeds the pad token; later steps feed only the newly
        // generated token while the KV cache accumulates.
        let mut decoded_ids: Vec<u32> = vec![PAD_TOKEN];
        let mut next_input = vec![PAD_TOKEN];

        for step in 0..max_length {
            let decoder_input = Tensor::new(next_input.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| ModelError::Inference(format!("decoder input: {e}")))?;

            let logits = self
                .model
                .decode(&decoder_input, &encoder_output)
                .map_err(|e| ModelError::Inference(format!("decoder forward: {e}")))?;

            let seq_len = logits
                .dim(1)
                .map_err(|e| ModelError::Inference(format!("logits dim: {e}")))?;
            let mut last_logits: Vec<f32> = logits
                .get_on_dim(1, seq_len - 1)
                .and_then(|t| t.flatten_all())
                .and_then(|t| t.to_vec1())
                .map_err(|e| ModelError::Inference(format!("read logits: {e}")))?;

            if step < min_length {
                last_logits[EOS_TOKEN as usize] = f32::NEG_INFINITY;
            }

            let next_token = argmax(&last_logits);
            if next_token == EOS_TOKEN {
                break;
            }

            decoded_ids.push(next_token);
            next_input = vec![next_token];
        }

        // Skip the leading pad token.
        let output = self
            .tokenizer
            .decode(&decoded_ids[1..], true)
            .map_err(|e| ModelError::Inference(format!("detokenize: {e}")))?;

        Ok(output)
    }
}

fn argmax(logits: &[f32]) -> u32 {
    let mut best = 0usize;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &value) in logits.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best = i;
        }
    }
    best as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_the_largest_logit() {
        assert_eq!(argmax(&[0.1, 2.5, -1.0, 2.4]), 1);
        assert_eq!(argmax(&[f32::NEG_INFINITY, -3.0]), 1);
    }

    #[test]
    fn model_is_lazy_until_first_inference() {
        let model = T5SummarizationModel::new(T5SummarizationModel::DEFAULT_REPO);
        assert!(model.loaded.is_none());
    }
}
