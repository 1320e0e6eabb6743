//! flan-t5 summarization backend.
//!
//! Wraps `google/flan-t5-base` (or any T5-family checkpoint) via
//! candle. Decoding is beam search over full prefixes, so the model's
//! KV cache stays disabled.

use std::path::PathBuf;
use std::sync::Mutex;

use candle_core::{D, DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_nn::ops::log_softmax;
use candle_transformers::models::t5;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{Tokenizer, TruncationParams};

use paperdigest_core::{Config, ModelError, SummaryBackend};

const REVISION: &str = "main";

/// Instruction prefix prepended to every section before encoding.
const PROMPT_PREFIX: &str = "Summarize: ";

/// Resolved paths to the three files a T5 checkpoint needs.
#[derive(Debug)]
struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

/// flan-t5 based implementation of [`SummaryBackend`].
///
/// The model is loaded once and reused for the process lifetime.
/// `decode` needs `&mut self`, so the model sits behind a `Mutex`;
/// callers are sequential, the lock is never contended.
pub struct FlanT5Summarizer {
    model: Mutex<t5::T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start_token: u32,
    eos_token: u32,
    max_summary_tokens: usize,
    num_beams: usize,
    temperature: f64,
}

impl FlanT5Summarizer {
    /// Load model and tokenizer per `config`. Files come from the
    /// configured local directory when present, otherwise from the
    /// Hugging Face Hub.
    pub fn load(config: &Config) -> Result<Self, ModelError> {
        let files = locate_model_files(config)?;

        let raw_config = std::fs::read_to_string(&files.config)
            .map_err(|e| ModelError::Load(format!("failed to read model config: {}", e)))?;
        let mut t5_config: t5::Config = serde_json::from_str(&raw_config)
            .map_err(|e| ModelError::Load(format!("failed to parse model config: {}", e)))?;
        // Full-prefix decoding; beams would otherwise share cache state.
        t5_config.use_cache = false;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| ModelError::Load(format!("failed to load tokenizer: {}", e)))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_input_tokens,
                ..Default::default()
            }))
            .map_err(|e| ModelError::Load(format!("failed to set truncation: {}", e)))?;

        let device = Device::Cpu;
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DType::F32, &device)
                .map_err(|e| ModelError::Load(format!("failed to load weights: {}", e)))?
        };
        let model = t5::T5ForConditionalGeneration::load(vb, &t5_config)
            .map_err(|e| ModelError::Load(format!("failed to build model: {}", e)))?;

        tracing::info!(model = %config.model_id, "summarization model loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            device,
            decoder_start_token: t5_config
                .decoder_start_token_id
                .unwrap_or(t5_config.pad_token_id) as u32,
            eos_token: t5_config.eos_token_id as u32,
            max_summary_tokens: config.max_summary_tokens,
            num_beams: config.num_beams,
            temperature: config.temperature,
        })
    }

    fn generate(
        &self,
        model: &mut t5::T5ForConditionalGeneration,
        encoder_output: &Tensor,
    ) -> Result<Vec<u32>, ModelError> {
        let mut beams = vec![Beam {
            tokens: vec![self.decoder_start_token],
            log_prob: 0.0,
            finished: false,
        }];

        for _ in 0..self.max_summary_tokens {
            if beams.iter().all(|b| b.finished) {
                break;
            }

            let mut candidates = Vec::with_capacity(self.num_beams * self.num_beams);
            for beam in &beams {
                if beam.finished {
                    candidates.push(beam.clone());
                    continue;
                }

                let decoder_ids = Tensor::new(beam.tokens.as_slice(), &self.device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(|e| ModelError::Generation(e.to_string()))?;
                // decode returns logits for the last position only
                let logits = model
                    .decode(&decoder_ids, encoder_output)
                    .and_then(|t| t.squeeze(0))
                    .map_err(|e| ModelError::Generation(e.to_string()))?;
                let scaled = (logits / self.temperature)
                    .map_err(|e| ModelError::Generation(e.to_string()))?;
                let log_probs = log_softmax(&scaled, D::Minus1)
                    .and_then(|t| t.to_vec1::<f32>())
                    .map_err(|e| ModelError::Generation(e.to_string()))?;

                for (token, lp) in top_k(&log_probs, self.num_beams) {
                    let mut tokens = beam.tokens.clone();
                    tokens.push(token);
                    candidates.push(Beam {
                        finished: token == self.eos_token,
                        tokens,
                        log_prob: beam.log_prob + f64::from(lp),
                    });
                }
            }

            candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
            candidates.truncate(self.num_beams);
            beams = candidates;
        }

        let best = beams
            .into_iter()
            .max_by(|a, b| a.score().total_cmp(&b.score()))
            .ok_or_else(|| ModelError::Generation("beam search produced no output".into()))?;
        Ok(best.tokens)
    }
}

impl SummaryBackend for FlanT5Summarizer {
    fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let prompt = format!("{}{}", PROMPT_PREFIX, text);
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| ModelError::Tokenization(e.to_string()))?;
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| ModelError::Generation(e.to_string()))?;

        let mut model = self
            .model
            .lock()
            .map_err(|_| ModelError::Generation("model lock poisoned".into()))?;
        let encoder_output = model
            .encode(&input_ids)
            .map_err(|e| ModelError::Generation(e.to_string()))?;
        let output_tokens = self.generate(&mut model, &encoder_output)?;
        drop(model);

        let summary = self
            .tokenizer
            .decode(&output_tokens, true)
            .map_err(|e| ModelError::Generation(e.to_string()))?;
        Ok(summary.trim().to_string())
    }
}

/// One beam-search hypothesis.
#[derive(Debug, Clone)]
struct Beam {
    tokens: Vec<u32>,
    log_prob: f64,
    finished: bool,
}

impl Beam {
    /// Length-normalized log probability (excluding the start token).
    fn score(&self) -> f64 {
        let generated = self.tokens.len().saturating_sub(1).max(1);
        self.log_prob / generated as f64
    }
}

/// The `k` highest-scoring tokens with their log probabilities.
fn top_k(log_probs: &[f32], k: usize) -> Vec<(u32, f32)> {
    let mut indexed: Vec<(u32, f32)> = log_probs
        .iter()
        .enumerate()
        .map(|(i, &lp)| (i as u32, lp))
        .collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.truncate(k);
    indexed
}

/// Find the model files locally or fetch them from the Hub.
fn locate_model_files(config: &Config) -> Result<ModelFiles, ModelError> {
    if let Some(dir) = &config.model_dir {
        let files = ModelFiles {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
        };
        for path in [&files.config, &files.tokenizer, &files.weights] {
            if !path.exists() {
                return Err(ModelError::Load(format!(
                    "model directory {} is missing {}",
                    dir.display(),
                    path.file_name().and_then(|n| n.to_str()).unwrap_or("?"),
                )));
            }
        }
        tracing::info!(dir = %dir.display(), "loading model from local directory");
        return Ok(files);
    }

    tracing::info!(model = %config.model_id, "fetching model files from the Hub");
    let api = Api::new().map_err(|e| ModelError::Load(format!("hub API error: {}", e)))?;
    let repo = api.repo(Repo::with_revision(
        config.model_id.clone(),
        RepoType::Model,
        REVISION.to_string(),
    ));
    let get = |name: &str| {
        repo.get(name)
            .map_err(|e| ModelError::Load(format!("failed to fetch {}: {}", name, e)))
    };
    Ok(ModelFiles {
        config: get("config.json")?,
        tokenizer: get("tokenizer.json")?,
        weights: get("model.safetensors")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_k_picks_highest_log_probs() {
        let log_probs = [-3.0, -0.5, -2.0, -0.1];
        let top = top_k(&log_probs, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 3);
        assert_eq!(top[1].0, 1);
    }

    #[test]
    fn top_k_handles_short_input() {
        let top = top_k(&[-1.0], 2);
        assert_eq!(top, vec![(0, -1.0)]);
    }

    #[test]
    fn beam_score_is_length_normalized() {
        let short = Beam {
            tokens: vec![0, 1],
            log_prob: -1.0,
            finished: true,
        };
        let long = Beam {
            tokens: vec![0, 1, 2, 3, 4],
            log_prob: -2.0,
            finished: true,
        };
        // -1.0 over 1 token vs -2.0 over 4 tokens.
        assert!(long.score() > short.score());
    }

    #[test]
    fn missing_local_directory_is_a_load_error() {
        let config = Config {
            model_dir: Some(PathBuf::from("/nonexistent/paperdigest-model")),
            ..Config::default()
        };
        let err = locate_model_files(&config).unwrap_err();
        assert!(matches!(err, ModelError::Load(_)));
        assert!(err.to_string().contains("config.json"));
    }
}
