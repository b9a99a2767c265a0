// Unit tests for text signal extraction.
//
// Exercises each lexicon and counter through the public extract()
// entry point, including the substring and dedup rules.

use credence::signals::extract;

// ============================================================
// Sources and links
// ============================================================

#[test]
fn sources_detected_from_lexicon() {
    for text in [
        "Source: the city council minutes",
        "according to the minister",
        "a new STUDY finds",
        "the report says",
        "a professor explained",
        "the data shows otherwise",
    ] {
        assert!(extract(text).has_sources, "{text:?} should have sources");
    }
}

#[test]
fn no_sources_in_plain_opinion() {
    assert!(!extract("I think the game last night was great").has_sources);
}

#[test]
fn urls_detected() {
    assert!(extract("read more at http://example.org/a").has_urls);
    assert!(extract("read more at https://example.org/a").has_urls);
    assert!(extract("read more at www.example.org").has_urls);
}

// ============================================================
// Clickbait and suspicious wording
// ============================================================

#[test]
fn clickbait_phrases_detected() {
    for text in [
        "SHOCKING footage",
        "this is unbelievable",
        "You won't believe what happened",
        "a must see video",
        "Breaking: markets fall",
        "click here for more",
    ] {
        assert!(extract(text).has_clickbait, "{text:?} should be clickbait");
    }
}

#[test]
fn breaking_without_colon_is_not_clickbait() {
    assert!(!extract("breaking news from the capital").has_clickbait);
}

#[test]
fn suspicious_words_counted_once_per_entry() {
    let s = extract("miracle miracle miracle secret");
    assert_eq!(s.suspicious_word_count, 2);
}

#[test]
fn suspicious_multi_word_phrases() {
    let s = extract("Doctors hate this one weird trick they don't want you to know");
    assert_eq!(s.suspicious_word_count, 3);
}

#[test]
fn reliable_words_substring_match() {
    // research (in "researchers"), official (in "officials"), confirmed
    let s = extract("Researchers and officials confirmed it");
    assert_eq!(s.reliable_word_count, 3);
}

// ============================================================
// Counters
// ============================================================

#[test]
fn all_caps_on_original_text() {
    assert!(extract("STOP sharing this").has_all_caps);
    assert!(!extract("Stop sharing this").has_all_caps);
}

#[test]
fn punctuation_literal_counts() {
    let s = extract("!?!?!");
    assert_eq!(s.exclamation_count, 3);
    assert_eq!(s.question_count, 2);
}

#[test]
fn word_count_whitespace_tokens() {
    assert_eq!(extract("one two  three\tfour\nfive").word_count, 5);
    assert_eq!(extract("   ").word_count, 0);
}

#[test]
fn extraction_is_deterministic() {
    let text = "BREAKING: According to a study, this miracle works!!!";
    assert_eq!(extract(text), extract(text));
}
