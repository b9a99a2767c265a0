// Image authenticity: a heuristic proxy, not a forensic classifier.
//
// Fetches the first attached image, measures sharpness and color spread
// locally, asks an external face-analysis service about faces, and folds
// the five checks into a 0-100 authenticity score. Results are indicative
// only. Every failure along the way yields no result rather than an error.

pub mod analyzer;
pub mod authenticity;
pub mod face;
pub mod metrics;

pub use analyzer::ImageAuthenticityAnalyzer;
pub use authenticity::{
    score_authenticity, AuthenticityStatus, ImageAuthenticityResult, RiskLevel,
};
pub use face::{DeepFaceClient, FaceAnalysis, FaceAnalyzer, FaceRegion};
pub use metrics::ImageMetrics;
