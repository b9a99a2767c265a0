// Signal extraction: turns raw post text into a TextSignals record.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use super::lexicon::{
    count_distinct, CLICKBAIT_PHRASES, RELIABLE_WORDS, SOURCE_PHRASES, SUSPICIOUS_WORDS,
};

/// A word-bounded run of four or more uppercase letters ("BREAKING", "NASA").
static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{4,}\b").expect("valid all-caps pattern"));

/// "you won't believe" with any (or no) apostrophe character.
static WONT_BELIEVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"you won.?t believe").expect("valid clickbait pattern"));

const URL_MARKERS: [&str; 3] = ["http://", "https://", "www."];

/// Signals derived from a post's text. Computed once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSignals {
    /// Whitespace-delimited token count
    pub word_count: usize,
    /// Mentions a source ("according to", "study", ...)
    pub has_sources: bool,
    /// Contains a link
    pub has_urls: bool,
    /// Contains a clickbait phrase
    pub has_clickbait: bool,
    /// Contains a shouted word (4+ uppercase letters)
    pub has_all_caps: bool,
    pub exclamation_count: usize,
    pub question_count: usize,
    /// Distinct suspicious lexicon entries present
    pub suspicious_word_count: usize,
    /// Distinct reliable lexicon entries present
    pub reliable_word_count: usize,
}

/// Extract all text signals from `text`.
///
/// Lexicon checks run against the lowercased text; the all-caps check runs
/// against the original. Any input, including the empty string, produces a
/// well-defined result.
pub fn extract(text: &str) -> TextSignals {
    let lower = text.to_lowercase();

    let has_clickbait = WONT_BELIEVE.is_match(&lower)
        || CLICKBAIT_PHRASES
            .iter()
            .any(|phrase| lower.contains(phrase));

    TextSignals {
        word_count: text.split_whitespace().count(),
        has_sources: SOURCE_PHRASES.iter().any(|phrase| lower.contains(phrase)),
        has_urls: URL_MARKERS.iter().any(|marker| lower.contains(marker)),
        has_clickbait,
        has_all_caps: ALL_CAPS.is_match(text),
        exclamation_count: text.matches('!').count(),
        question_count: text.matches('?').count(),
        suspicious_word_count: count_distinct(&lower, &SUSPICIOUS_WORDS),
        reliable_word_count: count_distinct(&lower, &RELIABLE_WORDS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let s = extract("");
        assert_eq!(s.word_count, 0);
        assert!(!s.has_sources && !s.has_urls && !s.has_clickbait && !s.has_all_caps);
        assert_eq!(s.suspicious_word_count, 0);
        assert_eq!(s.reliable_word_count, 0);
    }

    #[test]
    fn test_all_caps_is_case_sensitive() {
        assert!(extract("this is HUGE news").has_all_caps);
        assert!(!extract("this is huge news").has_all_caps);
        // Three letters is not enough
        assert!(!extract("the CDC said so").has_all_caps);
    }

    #[test]
    fn test_all_caps_needs_word_boundary() {
        // Mixed-case words don't count even with a long uppercase run inside
        assert!(!extract("the XMLHttpRequest object").has_all_caps);
    }

    #[test]
    fn test_wont_believe_variants() {
        assert!(extract("You won't believe it").has_clickbait);
        assert!(extract("you wont believe it").has_clickbait);
        assert!(extract("you won\u{2019}t believe it").has_clickbait);
    }

    #[test]
    fn test_urls_detected_case_insensitively() {
        assert!(extract("see HTTPS://example.com").has_urls);
        assert!(extract("see www.example.com").has_urls);
        assert!(!extract("see example dot com").has_urls);
    }

    #[test]
    fn test_punctuation_counts() {
        let s = extract("What?? Really?! No!!");
        assert_eq!(s.question_count, 3);
        assert_eq!(s.exclamation_count, 3);
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(extract("  one\ttwo\n\nthree  ").word_count, 3);
    }
}
