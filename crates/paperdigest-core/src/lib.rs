use std::path::PathBuf;

pub mod backend;
pub mod section;
pub mod summarize;

// Re-export for convenience
pub use backend::{BackendError, ModelError, PdfBackend, SummaryBackend};
pub use section::{SectionKind, SectionMap, SummaryMap, SummaryOutcome};
pub use summarize::{NO_CONTENT_SENTINEL, summarize_section};

#[cfg(any(test, feature = "mock"))]
pub mod mock;

/// Configuration for the summarization pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hugging Face model id for the seq2seq summarizer.
    pub model_id: String,
    /// Local directory holding pre-downloaded model files
    /// (config.json, tokenizer.json, model.safetensors).
    /// When unset, files are fetched from the Hub at startup.
    pub model_dir: Option<PathBuf>,
    /// Input token budget; longer section texts are truncated.
    pub max_input_tokens: usize,
    /// Generated summary length cap, in tokens.
    pub max_summary_tokens: usize,
    /// Beam width for beam-search decoding.
    pub num_beams: usize,
    /// Sampling temperature applied to the logits before scoring.
    pub temperature: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_id: "google/flan-t5-base".to_string(),
            model_dir: None,
            max_input_tokens: 1024,
            max_summary_tokens: 150,
            num_beams: 2,
            temperature: 0.7,
        }
    }
}

impl Config {
    /// Resolve configuration from the environment: `PAPERDIGEST_MODEL_DIR`
    /// points at a local model directory, everything else defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("PAPERDIGEST_MODEL_DIR") {
            if !dir.is_empty() {
                config.model_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(id) = std::env::var("PAPERDIGEST_MODEL_ID") {
            if !id.is_empty() {
                config.model_id = id;
            }
        }
        config
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_matches_flan_t5_generation_settings() {
        let config = Config::default();
        assert_eq!(config.model_id, "google/flan-t5-base");
        assert_eq!(config.max_input_tokens, 1024);
        assert_eq!(config.max_summary_tokens, 150);
        assert_eq!(config.num_beams, 2);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    }
}
