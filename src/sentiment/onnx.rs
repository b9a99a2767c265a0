// Local ONNX sentiment classifier using DistilBERT fine-tuned on SST-2.
//
// Runs entirely on the local CPU. No API calls, no rate limits.
//
// Model: Xenova/distilbert-base-uncased-finetuned-sst-2-english (quantized)
// Output: 2 logits (NEGATIVE, POSITIVE), converted with softmax.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::download::{self, MODEL_FILE, TOKENIZER_FILE};
use super::traits::{ClassifierLoader, SentimentClassifier, SentimentLabel, SentimentResult};
use crate::output::truncate_chars;

/// Labels output by the SST-2 head, in logit order.
const LABEL_ORDER: [SentimentLabel; 2] = [SentimentLabel::Negative, SentimentLabel::Positive];

/// DistilBERT's maximum sequence length.
const MAX_TOKENS: usize = 512;

/// Local ONNX-based sentiment classifier. Holds the session and tokenizer
/// behind Arc so inference can run on spawn_blocking.
pub struct OnnxSentimentClassifier {
    // Session::run takes &mut self, hence the Mutex
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxSentimentClassifier {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model_quantized.onnx` and `tokenizer.json` to exist in `model_dir`.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `credence download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Tokenizer file not found: {}\nRun `credence download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure tokenizer truncation: {}", e))?;

        debug!("Loaded ONNX sentiment model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl SentimentClassifier for OnnxSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<SentimentResult> {
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let encoding = tokenizer
                .encode(text.as_str(), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

            let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
            let attention_mask: Vec<i64> = encoding
                .get_attention_mask()
                .iter()
                .map(|&m| m as i64)
                .collect();
            let shape = [1_i64, input_ids.len() as i64];

            let input_ids_tensor = Tensor::from_array((shape, input_ids))
                .context("Failed to create input_ids tensor")?;
            let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
                .context("Failed to create attention_mask tensor")?;

            let logits = {
                let mut session = session
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

                let outputs = session
                    .run(ort::inputs! {
                        "input_ids" => input_ids_tensor,
                        "attention_mask" => attention_mask_tensor
                    })
                    .context("ONNX inference failed")?;

                // Output shape: [1, 2]
                let (_out_shape, data) = outputs[0]
                    .try_extract_tensor::<f32>()
                    .context("Failed to extract output tensor")?;

                data.to_vec()
            };

            if logits.len() < LABEL_ORDER.len() {
                anyhow::bail!("Expected {} logits, got {}", LABEL_ORDER.len(), logits.len());
            }

            let probs = softmax(&logits[..LABEL_ORDER.len()]);
            let result = pick_label(&probs);

            debug!(
                label = %result.label,
                confidence = result.confidence,
                text_preview = %truncate_chars(&text, 50),
                "ONNX classified text"
            );

            Ok(result)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Loads `OnnxSentimentClassifier` from a model directory, optionally
/// downloading the files first when they are missing.
pub struct OnnxClassifierLoader {
    pub model_dir: PathBuf,
    pub auto_download: bool,
    /// Repo the files are fetched from when `auto_download` is set
    pub download_url: String,
}

impl OnnxClassifierLoader {
    pub fn new(model_dir: PathBuf, auto_download: bool) -> Self {
        Self {
            model_dir,
            auto_download,
            download_url: download::SENTIMENT_HF_URL.to_string(),
        }
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }
}

#[async_trait]
impl ClassifierLoader for OnnxClassifierLoader {
    async fn load(&self) -> Result<Arc<dyn SentimentClassifier>> {
        if !download::model_files_present(&self.model_dir) {
            if !self.auto_download {
                anyhow::bail!(
                    "Sentiment model files not found in {}\n\
                     Run `credence download-model` or set CREDENCE_MODEL_AUTO_DOWNLOAD=true.",
                    self.model_dir.display()
                );
            }
            download::download_model_from(&self.download_url, &self.model_dir, false).await?;
        }

        let model_dir = self.model_dir.clone();
        let classifier =
            tokio::task::spawn_blocking(move || OnnxSentimentClassifier::load(&model_dir))
                .await
                .context("spawn_blocking panicked")??;
        Ok(Arc::new(classifier))
    }
}

/// Numerically stable softmax.
fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Pick the most probable label. `probs` is in LABEL_ORDER.
fn pick_label(probs: &[f64]) -> SentimentResult {
    if probs[1] > probs[0] {
        SentimentResult {
            label: LABEL_ORDER[1],
            confidence: probs[1],
        }
    } else {
        SentimentResult {
            label: LABEL_ORDER[0],
            confidence: probs[0],
        }
    }
}
