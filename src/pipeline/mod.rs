// The analysis pipeline: validate, extract, score, enrich, assemble.
//
// One code path serves both text-only and image-bearing requests. Sentiment
// and image analysis are independent optional enrichments over the same
// base text score.

pub mod analyze;
pub mod request;
pub mod response;

pub use analyze::CredibilityPipeline;
pub use request::{AnalysisRequest, InputError, MAX_TEXT_CHARS};
pub use response::{assemble, AnalysisResponse};
