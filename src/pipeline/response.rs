// Response assembly: packages the score and every contributing signal.
//
// Optional sections appear only when their source produced a result:
// ai_* keys only with a sentiment result, face/deepfake keys only with an
// image result.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::media::ImageAuthenticityResult;
use crate::output::truncate_chars;
use crate::scoring::{CredibilityScore, CredibilityStatus};
use crate::sentiment::SentimentResult;
use crate::signals::TextSignals;

/// Length of the text preview echoed back in details.
const PREVIEW_CHARS: usize = 100;

/// What the caller gets back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub score: u8,
    pub status: CredibilityStatus,
    pub message: String,
    pub color: String,
    pub details: Map<String, Value>,
}

/// Merge all pipeline outputs into an AnalysisResponse.
pub fn assemble(
    text: &str,
    signals: &TextSignals,
    score: &CredibilityScore,
    sentiment: Option<&SentimentResult>,
    image: Option<&ImageAuthenticityResult>,
) -> AnalysisResponse {
    let mut details = Map::new();

    details.insert("word_count".into(), json!(signals.word_count));
    details.insert("has_sources".into(), json!(signals.has_sources));
    details.insert("has_urls".into(), json!(signals.has_urls));
    details.insert("has_clickbait".into(), json!(signals.has_clickbait));
    details.insert("has_all_caps".into(), json!(signals.has_all_caps));
    details.insert("exclamation_count".into(), json!(signals.exclamation_count));
    details.insert("question_count".into(), json!(signals.question_count));
    details.insert("suspicious_words".into(), json!(signals.suspicious_word_count));
    details.insert("reliable_indicators".into(), json!(signals.reliable_word_count));
    details.insert(
        "tweet_preview".into(),
        json!(truncate_chars(text, PREVIEW_CHARS)),
    );

    let method = if sentiment.is_some() {
        "heuristic+sentiment"
    } else {
        "heuristic"
    };
    details.insert("analysis_method".into(), json!(method));

    if let Some(s) = sentiment {
        details.insert("ai_sentiment".into(), json!(s.label.as_str()));
        details.insert("ai_confidence".into(), json!(s.confidence));
        details.insert(
            "ai_classification".into(),
            json!(format!("sentiment: {}", s.label.as_str().to_lowercase())),
        );
    }

    if let Some(img) = image {
        details.insert("face_detected".into(), json!(img.face_detected));
        details.insert("face_emotion".into(), json!(img.dominant_emotion));
        details.insert("face_age".into(), json!(img.estimated_age));
        details.insert("face_gender".into(), json!(img.dominant_gender));
        details.insert("deepfake_detected".into(), json!(img.deepfake_detected));
        details.insert("authenticity_score".into(), json!(img.authenticity_score));
        details.insert("deepfake_risk".into(), json!(img.risk_level.as_str()));
        details.insert("image_status".into(), json!(img.status.as_str()));
        details.insert("deepfake_indicators".into(), json!(img.indicators));
    }

    AnalysisResponse {
        score: score.score,
        status: score.status,
        message: score.status.message().to_string(),
        color: score.status.color().to_string(),
        details,
    }
}
