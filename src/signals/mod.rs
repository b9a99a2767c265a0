// Text signals: deterministic pattern extraction from the post text.
//
// Everything the credibility score is built from lives here: lexicon
// membership checks, punctuation counts, and the word count. Extraction
// is pure and infallible, so the scorer can always fall back to it.

pub mod extract;
pub mod lexicon;

pub use extract::{extract, TextSignals};
