// Sentiment augmentation: an optional, lazily acquired classifier.
//
// The SentimentClassifier trait is the capability; ClassifierLoader is how
// it gets acquired. SentimentAugmenter wraps both in a once-only state
// machine so a failed model load degrades to heuristics-only scoring for
// the rest of the process instead of being retried on every request.

pub mod augmenter;
pub mod download;
pub mod onnx;
pub mod traits;

pub use augmenter::{ClassifierState, ClassifierStatus, SentimentAugmenter};
pub use traits::{ClassifierLoader, SentimentClassifier, SentimentLabel, SentimentResult};
