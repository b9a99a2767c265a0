// Scoring: the additive credibility policy and its status bands.

pub mod credibility;
pub mod status;

pub use credibility::{compute_credibility_score, CredibilityScore, CredibilityWeights};
pub use status::CredibilityStatus;
