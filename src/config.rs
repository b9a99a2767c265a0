use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::media::{DeepFaceClient, ImageAuthenticityAnalyzer};
use crate::pipeline::CredibilityPipeline;
use crate::sentiment::onnx::OnnxClassifierLoader;
use crate::sentiment::SentimentAugmenter;

/// Which sentiment backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentBackend {
    /// Local ONNX model (default), loaded on first use
    Onnx,
    /// No sentiment classifier; heuristics only
    Off,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Which sentiment classifier to use (default: Onnx)
    pub sentiment_backend: SentimentBackend,
    /// Directory containing the ONNX model files
    pub model_dir: PathBuf,
    /// Download missing model files on first use instead of failing
    pub model_auto_download: bool,
    /// DeepFace-compatible face-analysis API. Unset disables image analysis.
    pub face_api_url: Option<String>,
    /// Timeout for fetching attached images
    pub image_timeout: Duration,
    pub port: u16,
    pub bind: String,
}

impl Config {
    /// Load configuration from environment variables. Everything has a default.
    pub fn load() -> Result<Self> {
        let sentiment_backend = match env::var("CREDENCE_SENTIMENT").as_deref() {
            Ok("off") | Ok("none") => SentimentBackend::Off,
            // "onnx" or unset both default to ONNX
            _ => SentimentBackend::Onnx,
        };

        let model_dir = env::var("CREDENCE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::sentiment::download::default_model_dir());

        let model_auto_download = matches!(
            env::var("CREDENCE_MODEL_AUTO_DOWNLOAD").as_deref(),
            Ok("1") | Ok("true") | Ok("yes")
        );

        let image_timeout = match env::var("CREDENCE_IMAGE_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("CREDENCE_IMAGE_TIMEOUT_SECS is not a number: {v}"))?,
            ),
            Err(_) => crate::media::analyzer::DEFAULT_FETCH_TIMEOUT,
        };

        let port = match env::var("CREDENCE_PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("CREDENCE_PORT is not a valid port: {v}"))?,
            Err(_) => 8000,
        };

        Ok(Self {
            sentiment_backend,
            model_dir,
            model_auto_download,
            face_api_url: env::var("CREDENCE_FACE_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            image_timeout,
            port,
            bind: env::var("CREDENCE_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
        })
    }

    /// Build the sentiment augmenter for the configured backend.
    /// Nothing is loaded until the first classification.
    pub fn sentiment_augmenter(&self) -> SentimentAugmenter {
        match self.sentiment_backend {
            SentimentBackend::Onnx => {
                info!(
                    model_dir = %self.model_dir.display(),
                    "Using local ONNX sentiment classifier"
                );
                SentimentAugmenter::new(Arc::new(OnnxClassifierLoader::new(
                    self.model_dir.clone(),
                    self.model_auto_download,
                )))
            }
            SentimentBackend::Off => {
                info!("Sentiment classifier disabled");
                SentimentAugmenter::disabled()
            }
        }
    }

    /// Build the image analyzer, or None when no face-analysis API is configured.
    pub fn image_analyzer(&self) -> Result<Option<ImageAuthenticityAnalyzer>> {
        let Some(url) = &self.face_api_url else {
            info!("CREDENCE_FACE_API_URL not set, image analysis disabled");
            return Ok(None);
        };
        info!(face_api = %url, "Image authenticity analysis enabled");
        let face = DeepFaceClient::new(url)?;
        let analyzer = ImageAuthenticityAnalyzer::new(Arc::new(face), self.image_timeout)?;
        Ok(Some(analyzer))
    }

    /// Assemble the full pipeline from this configuration.
    pub fn pipeline(&self) -> Result<CredibilityPipeline> {
        Ok(CredibilityPipeline::new(
            Arc::new(self.sentiment_augmenter()),
            self.image_analyzer()?,
        ))
    }
}
