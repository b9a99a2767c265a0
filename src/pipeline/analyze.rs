// CredibilityPipeline: runs one request end to end.
//
// 1. Validate the request (the only step that can reject)
// 2. Extract text signals
// 3. Classify sentiment, if the augmenter has a classifier
// 4. Score text signals plus sentiment
// 5. Analyze the first image, if an image analyzer is configured
// 6. Assemble the response
//
// Steps 3 and 5 never fail the request: their absence only removes
// fields from the response details.

use std::sync::Arc;

use tracing::{debug, info};

use super::request::{AnalysisRequest, InputError};
use super::response::{assemble, AnalysisResponse};
use crate::media::ImageAuthenticityAnalyzer;
use crate::scoring::{compute_credibility_score, CredibilityWeights};
use crate::sentiment::{ClassifierStatus, SentimentAugmenter};
use crate::signals;

pub struct CredibilityPipeline {
    sentiment: Arc<SentimentAugmenter>,
    images: Option<ImageAuthenticityAnalyzer>,
    weights: CredibilityWeights,
}

impl CredibilityPipeline {
    pub fn new(
        sentiment: Arc<SentimentAugmenter>,
        images: Option<ImageAuthenticityAnalyzer>,
    ) -> Self {
        Self {
            sentiment,
            images,
            weights: CredibilityWeights::default(),
        }
    }

    /// Text-only pipeline: no sentiment classifier, no image analysis.
    pub fn heuristic_only() -> Self {
        Self::new(Arc::new(SentimentAugmenter::disabled()), None)
    }

    pub fn with_weights(mut self, weights: CredibilityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn sentiment_status(&self) -> ClassifierStatus {
        self.sentiment.status()
    }

    pub fn image_analysis_enabled(&self) -> bool {
        self.images.is_some()
    }

    /// Analyze a request. Only validation can fail.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, InputError> {
        request.validate()?;

        let text = request.text.as_str();
        let signals = signals::extract(text);
        let sentiment = self.sentiment.classify(text).await;
        let score = compute_credibility_score(&signals, sentiment.as_ref(), &self.weights);

        let image = match (&self.images, request.first_image()) {
            (Some(analyzer), Some(url)) => {
                if request.images.len() > 1 {
                    debug!(count = request.images.len(), "Only the first image is analyzed");
                }
                analyzer.analyze(url).await
            }
            (None, Some(_)) => {
                debug!("Image analysis not configured, skipping attached image");
                None
            }
            _ => None,
        };

        info!(
            score = score.score,
            status = score.status.as_str(),
            words = signals.word_count,
            sentiment = sentiment.is_some(),
            image = image.is_some(),
            "Analyzed post"
        );

        Ok(assemble(
            text,
            &signals,
            &score,
            sentiment.as_ref(),
            image.as_ref(),
        ))
    }
}
