// Sentiment classifier traits: the swap-ready abstraction.
//
// The default implementation is a local ONNX DistilBERT model fine-tuned
// on SST-2. Tests substitute fakes for both traits without touching
// real models.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Binary sentiment label, serialized the way SST-2 models name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of classifying a single piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Probability of `label`, 0.0 to 1.0
    pub confidence: f64,
}

/// A loaded sentiment classifier. Async because inference is offloaded
/// to a blocking thread.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a single text. Callers bound the input length.
    async fn classify(&self, text: &str) -> Result<SentimentResult>;
}

/// Acquires a SentimentClassifier. Called at most once per augmenter.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SentimentClassifier>>;
}
