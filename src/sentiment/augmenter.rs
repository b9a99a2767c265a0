// Once-only classifier acquisition with permanent fallback.
//
// State machine: Unattempted -> Loaded, or Unattempted -> Unavailable.
// The transition happens at most once. A tokio OnceCell guards it, so
// concurrent first callers wait on a single load and all observe the
// same final state. The load itself runs on a spawned task, detached
// from any one caller's future.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::traits::{ClassifierLoader, SentimentClassifier, SentimentResult};

/// Longest text prefix (in characters) handed to the classifier.
pub const MAX_INPUT_CHARS: usize = 512;

/// Outcome of the one acquisition attempt.
#[derive(Clone)]
pub enum ClassifierState {
    Loaded(Arc<dyn SentimentClassifier>),
    Unavailable,
}

/// Observable tri-state of the augmenter, for status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierStatus {
    Unattempted,
    Loaded,
    Unavailable,
}

impl ClassifierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierStatus::Unattempted => "not loaded (will load on first use)",
            ClassifierStatus::Loaded => "loaded",
            ClassifierStatus::Unavailable => "unavailable (keyword analysis only)",
        }
    }
}

/// Best-effort sentiment enrichment. Absence never fails a request.
pub struct SentimentAugmenter {
    acquisition: Arc<Acquisition>,
}

/// The loader and the cell its single outcome lands in. Shared with the
/// task that drives the load.
struct Acquisition {
    loader: Option<Arc<dyn ClassifierLoader>>,
    state: OnceCell<ClassifierState>,
}

impl Acquisition {
    /// The settled state, running the load if nobody has started it yet.
    async fn outcome(self: Arc<Self>) -> ClassifierState {
        self.state.get_or_init(|| self.run()).await.clone()
    }

    async fn run(&self) -> ClassifierState {
        let Some(loader) = self.loader.clone() else {
            return ClassifierState::Unavailable;
        };
        info!("Loading sentiment classifier...");
        match tokio::spawn(async move { loader.load().await }).await {
            Ok(Ok(classifier)) => {
                info!("Sentiment classifier loaded");
                ClassifierState::Loaded(classifier)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Sentiment classifier unavailable, using keyword analysis only");
                ClassifierState::Unavailable
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Sentiment classifier loader panicked, using keyword analysis only"
                );
                ClassifierState::Unavailable
            }
        }
    }
}

impl SentimentAugmenter {
    /// Create an augmenter that will acquire its classifier from `loader`
    /// on first use.
    pub fn new(loader: Arc<dyn ClassifierLoader>) -> Self {
        Self {
            acquisition: Arc::new(Acquisition {
                loader: Some(loader),
                state: OnceCell::new(),
            }),
        }
    }

    /// An augmenter that starts (and stays) Unavailable.
    pub fn disabled() -> Self {
        Self {
            acquisition: Arc::new(Acquisition {
                loader: None,
                state: OnceCell::new_with(Some(ClassifierState::Unavailable)),
            }),
        }
    }

    pub fn status(&self) -> ClassifierStatus {
        match self.acquisition.state.get() {
            None => ClassifierStatus::Unattempted,
            Some(ClassifierState::Loaded(_)) => ClassifierStatus::Loaded,
            Some(ClassifierState::Unavailable) => ClassifierStatus::Unavailable,
        }
    }

    /// Acquire the classifier, loading it on the first call only.
    ///
    /// The load runs on its own task, so a caller dropped mid-load does not
    /// abandon it: later callers wait on the same in-flight acquisition.
    pub async fn acquire(&self) -> ClassifierState {
        if let Some(state) = self.acquisition.state.get() {
            return state.clone();
        }

        match tokio::spawn(Arc::clone(&self.acquisition).outcome()).await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Sentiment classifier acquisition task failed");
                ClassifierState::Unavailable
            }
        }
    }

    /// Classify the first `MAX_INPUT_CHARS` characters of `text`.
    ///
    /// Returns None if the classifier is unavailable or this call fails.
    /// A failed call does not change the acquisition state.
    pub async fn classify(&self, text: &str) -> Option<SentimentResult> {
        let classifier = match self.acquire().await {
            ClassifierState::Loaded(classifier) => classifier,
            ClassifierState::Unavailable => return None,
        };

        let input = char_prefix(text, MAX_INPUT_CHARS);
        match classifier.classify(input).await {
            Ok(result) => {
                debug!(
                    label = %result.label,
                    confidence = result.confidence,
                    "Sentiment classified"
                );
                Some(result)
            }
            Err(e) => {
                warn!(error = %e, "Sentiment classification failed");
                None
            }
        }
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
