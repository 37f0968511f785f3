//! Whisper speech-to-text via whisper.cpp (`whisper-rs`), running entirely
//! locally. The context is loaded on first use and reused for the lifetime
//! of the component.

use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::error::ModelError;
use crate::llm::SpeechModel;

/// Sample rate the model expects; the fetcher produces audio at this rate.
const WHISPER_SAMPLE_RATE: u32 = 16_000;

pub struct WhisperSpeechModel {
    model_path: PathBuf,
    /// ISO language code forced during decoding; `None` lets the model
    /// detect the language itself.
    language: Option<String>,
    context: Option<WhisperContext>,
}

impl WhisperSpeechModel {
    pub fn new(model_path: impl Into<PathBuf>, language: Option<String>) -> Self {
        Self {
            model_path: model_path.into(),
            language,
            context: None,
        }
    }

    /// Builds a model from a size name (`tiny`, `base`, `small`, `medium`,
    /// `large`), resolving `ggml-<size>.bin` from the user cache directory
    /// or a local `models/` directory.
    pub fn from_size(size: &str, language: Option<String>) -> Result<Self, ModelError> {
        let path = resolve_model_path(size)?;
        Ok(Self::new(path, language))
    }

    fn load_context(model_path: &Path) -> Result<WhisperContext, ModelError> {
        tracing::info!(model = %model_path.display(), "Loading whisper model (this may take a while)");
        let path_str = model_path
            .to_str()
            .ok_or_else(|| ModelError::Load("invalid UTF-8 in whisper model path".into()))?;
        let context =
            WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
                .map_err(|e| ModelError::Load(format!("whisper model load: {e}")))?;
        tracing::info!("Whisper model loaded");
        Ok(context)
    }
}

impl SpeechModel for WhisperSpeechModel {
    #[tracing::instrument(skip(self))]
    async fn transcribe(&mut self, audio_path: &Path) -> Result<String, ModelError> {
        if self.context.is_none() {
            self.context = Some(Self::load_context(&self.model_path)?);
        }
        let Some(context) = self.context.as_ref() else {
            return Err(ModelError::Load("whisper context unavailable".into()));
        };

        let samples = read_wav_samples(audio_path)?;

        let mut state = context
            .create_state()
            .map_err(|e| ModelError::Inference(format!("whisper state: {e}")))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(self.language.as_deref());
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &samples)
            .map_err(|e| ModelError::Inference(format!("whisper inference: {e}")))?;

        let mut text = String::new();
        for segment in state.as_iter() {
            text.push_str(&segment.to_string());
        }

        let transcript = text.trim().to_string();
        tracing::info!(chars = transcript.chars().count(), "Transcription complete");
        Ok(transcript)
    }
}

/// Reads a 16 kHz PCM WAV file into normalized f32 samples, downmixing
/// stereo to mono.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, ModelError> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| ModelError::Inference(format!("read wav {}: {e}", path.display())))?;
    let spec = reader.spec();

    if spec.sample_rate != WHISPER_SAMPLE_RATE {
        return Err(ModelError::Inference(format!(
            "expected {WHISPER_SAMPLE_RATE} Hz audio, got {} Hz",
            spec.sample_rate
        )));
    }
    if spec.bits_per_sample != 16 {
        return Err(ModelError::Inference(format!(
            "expected 16-bit PCM audio, got {} bits",
            spec.bits_per_sample
        )));
    }

    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<_, _>>()
        .map_err(|e| ModelError::Inference(format!("decode wav samples: {e}")))?;

    let mono: Vec<i16> = if spec.channels == 2 {
        samples
            .chunks_exact(2)
            .map(|pair| ((pair[0] as i32 + pair[1] as i32) / 2) as i16)
            .collect()
    } else {
        samples
    };

    Ok(mono.iter().map(|&s| s as f32 / 32768.0).collect())
}

/// Looks for `ggml-<size>.bin` in `<cache_dir>/vid-digest/models` and in a
/// local `models/` directory.
pub fn resolve_model_path(size: &str) -> Result<PathBuf, ModelError> {
    let filename = format!("ggml-{size}.bin");

    let mut candidates = Vec::new();
    if let Some(cache) = dirs::cache_dir() {
        candidates.push(cache.join("vid-digest/models").join(&filename));
    }
    candidates.push(PathBuf::from("models").join(&filename));

    for path in &candidates {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    Err(ModelError::Load(format!(
        "whisper model '{filename}' not found; searched {}",
        candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )))
}
