// Canonical lexicons for text signal extraction.
//
// Two sets of phrase lists exist for this domain in the wild; these are the
// superset chosen as the stable API. Changing an entry changes scores, so
// additions should come with a test in tests/unit_signals.rs.

/// Phrases that indicate the post cites a source.
pub const SOURCE_PHRASES: [&str; 8] = [
    "source:",
    "according to",
    "study",
    "research",
    "report",
    "university",
    "professor",
    "data shows",
];

/// Clickbait phrases. "you won't believe" is matched by pattern so
/// "wont" and typographic apostrophes also count.
pub const CLICKBAIT_PHRASES: [&str; 6] = [
    "shocking",
    "unbelievable",
    "you won't believe",
    "must see",
    "breaking:",
    "click here",
];

/// Phrases typical of misinformation and scams. Each costs 15 points.
pub const SUSPICIOUS_WORDS: [&str; 6] = [
    "miracle",
    "secret",
    "they don't want you to know",
    "doctors hate",
    "one weird trick",
    "scam",
];

/// Words typical of careful, sourced writing. Each adds 8 points.
pub const RELIABLE_WORDS: [&str; 8] = [
    "study",
    "research",
    "university",
    "professor",
    "journal",
    "official",
    "confirmed",
    "data",
];

/// Count the distinct lexicon entries contained in `text_lower`.
///
/// Substring containment, not tokenized matching: "researchers" counts
/// as "research". Each entry counts at most once.
pub fn count_distinct(text_lower: &str, lexicon: &[&str]) -> usize {
    lexicon
        .iter()
        .filter(|entry| text_lower.contains(*entry))
        .count()
}
