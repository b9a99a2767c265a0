// Additive credibility score.
//
// Starts from a neutral 60 and adds or subtracts a fixed amount per signal.
// Every term is visible in the response details, so a reader can check
// exactly why a post landed where it did. No training data needed.

use serde::Serialize;

use super::status::CredibilityStatus;
use crate::sentiment::traits::{SentimentLabel, SentimentResult};
use crate::signals::TextSignals;

/// Weights for the additive credibility policy.
///
/// Positive values reward a signal, penalties are stored as positive
/// magnitudes and subtracted.
pub struct CredibilityWeights {
    /// Neutral starting score (default 60)
    pub baseline: i32,
    pub sources_bonus: i32,
    pub urls_bonus: i32,
    /// Per distinct reliable lexicon entry
    pub reliable_word_bonus: i32,
    pub clickbait_penalty: i32,
    pub all_caps_penalty: i32,
    /// Applied when there are more than `punctuation_threshold` exclamation marks
    pub exclamation_penalty: i32,
    /// Applied when there are more than `punctuation_threshold` question marks
    pub question_penalty: i32,
    pub punctuation_threshold: usize,
    /// Per distinct suspicious lexicon entry
    pub suspicious_word_penalty: i32,
    /// Applied when the text has fewer than `short_text_words` words
    pub short_text_penalty: i32,
    pub short_text_words: usize,
    /// Scale for POSITIVE sentiment confidence (added)
    pub positive_sentiment_scale: f64,
    /// Scale for NEGATIVE sentiment confidence (subtracted)
    pub negative_sentiment_scale: f64,
}

impl Default for CredibilityWeights {
    fn default() -> Self {
        Self {
            baseline: 60,
            sources_bonus: 15,
            urls_bonus: 5,
            reliable_word_bonus: 8,
            clickbait_penalty: 20,
            all_caps_penalty: 10,
            exclamation_penalty: 10,
            question_penalty: 5,
            punctuation_threshold: 2,
            suspicious_word_penalty: 15,
            short_text_penalty: 10,
            short_text_words: 10,
            positive_sentiment_scale: 10.0,
            negative_sentiment_scale: 5.0,
        }
    }
}

/// A clamped credibility score and its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredibilityScore {
    pub score: u8,
    pub status: CredibilityStatus,
}

/// Compute the credibility score from text signals and optional sentiment.
///
/// Returns a score from 0 to 100 and the corresponding status band.
pub fn compute_credibility_score(
    signals: &TextSignals,
    sentiment: Option<&SentimentResult>,
    weights: &CredibilityWeights,
) -> CredibilityScore {
    let raw = base_score(signals, weights) + sentiment_adjustment(sentiment, weights);

    let score = raw.clamp(0, 100) as u8;
    CredibilityScore {
        score,
        status: CredibilityStatus::from_score(score),
    }
}

/// The unclamped text-only score.
pub fn base_score(signals: &TextSignals, weights: &CredibilityWeights) -> i32 {
    let mut score = weights.baseline;

    if signals.has_sources {
        score += weights.sources_bonus;
    }
    if signals.has_urls {
        score += weights.urls_bonus;
    }
    score += signals.reliable_word_count as i32 * weights.reliable_word_bonus;

    if signals.has_clickbait {
        score -= weights.clickbait_penalty;
    }
    if signals.has_all_caps {
        score -= weights.all_caps_penalty;
    }
    if signals.exclamation_count > weights.punctuation_threshold {
        score -= weights.exclamation_penalty;
    }
    if signals.question_count > weights.punctuation_threshold {
        score -= weights.question_penalty;
    }
    score -= signals.suspicious_word_count as i32 * weights.suspicious_word_penalty;
    if signals.word_count < weights.short_text_words {
        score -= weights.short_text_penalty;
    }

    score
}

/// Points contributed by sentiment: +round(c*10) if positive, -round(c*5) if negative.
pub fn sentiment_adjustment(
    sentiment: Option<&SentimentResult>,
    weights: &CredibilityWeights,
) -> i32 {
    match sentiment {
        Some(s) => {
            let confidence = s.confidence.clamp(0.0, 1.0);
            match s.label {
                SentimentLabel::Positive => {
                    (confidence * weights.positive_sentiment_scale).round() as i32
                }
                SentimentLabel::Negative => {
                    -((confidence * weights.negative_sentiment_scale).round() as i32)
                }
            }
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::extract;

    fn neutral_signals() -> TextSignals {
        TextSignals {
            word_count: 12,
            has_sources: false,
            has_urls: false,
            has_clickbait: false,
            has_all_caps: false,
            exclamation_count: 0,
            question_count: 0,
            suspicious_word_count: 0,
            reliable_word_count: 0,
        }
    }

    #[test]
    fn test_neutral_text_scores_baseline() {
        let result =
            compute_credibility_score(&neutral_signals(), None, &CredibilityWeights::default());
        assert_eq!(result.score, 60);
        assert_eq!(result.status, CredibilityStatus::NeedsVerification);
    }

    #[test]
    fn test_short_text_penalty() {
        let mut s = neutral_signals();
        s.word_count = 9;
        let result = compute_credibility_score(&s, None, &CredibilityWeights::default());
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_punctuation_threshold_is_exclusive() {
        let mut s = neutral_signals();
        s.exclamation_count = 2;
        s.question_count = 2;
        let w = CredibilityWeights::default();
        assert_eq!(compute_credibility_score(&s, None, &w).score, 60);

        s.exclamation_count = 3;
        s.question_count = 3;
        // 60 - 10 - 5
        assert_eq!(compute_credibility_score(&s, None, &w).score, 45);
    }

    #[test]
    fn test_clamps_low() {
        let mut s = neutral_signals();
        s.suspicious_word_count = 6;
        s.has_clickbait = true;
        let result = compute_credibility_score(&s, None, &CredibilityWeights::default());
        assert_eq!(result.score, 0);
        assert_eq!(result.status, CredibilityStatus::PotentiallyMisleading);
    }

    #[test]
    fn test_clamps_high() {
        let mut s = neutral_signals();
        s.reliable_word_count = 8;
        s.has_sources = true;
        s.has_urls = true;
        let result = compute_credibility_score(&s, None, &CredibilityWeights::default());
        assert_eq!(result.score, 100);
        assert_eq!(result.status, CredibilityStatus::LikelyReliable);
    }

    #[test]
    fn test_positive_sentiment_rounds() {
        let sentiment = SentimentResult {
            label: SentimentLabel::Positive,
            confidence: 0.96,
        };
        let w = CredibilityWeights::default();
        // round(9.6) = 10
        assert_eq!(sentiment_adjustment(Some(&sentiment), &w), 10);
    }

    #[test]
    fn test_negative_sentiment_rounds() {
        let sentiment = SentimentResult {
            label: SentimentLabel::Negative,
            confidence: 0.99,
        };
        let w = CredibilityWeights::default();
        // -round(4.95) = -5
        assert_eq!(sentiment_adjustment(Some(&sentiment), &w), -5);
    }

    #[test]
    fn test_no_sentiment_no_adjustment() {
        assert_eq!(sentiment_adjustment(None, &CredibilityWeights::default()), 0);
    }

    #[test]
    fn test_scored_from_extracted_signals() {
        let signals = extract("Shocking! This miracle cure is a SCAM they hide from you!!!");
        let result = compute_credibility_score(&signals, None, &CredibilityWeights::default());
        // clickbait -20, caps -10, !x4 -10, miracle+scam -30 => -10 -> 0
        assert_eq!(result.score, 0);
    }
}
