// Credence: credibility scoring for social-media posts
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline; `pipeline` wires them together.

pub mod config;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod sentiment;
pub mod signals;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
