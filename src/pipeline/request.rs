// Inbound request and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted post text, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// Rejections that happen before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Tweet text is required")]
    EmptyText,
    #[error("Tweet text too long ({len} characters, max {max})")]
    TextTooLong { len: usize, max: usize },
}

/// A single analysis call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub text: String,
    /// Image URLs; only the first is analyzed
    #[serde(default)]
    pub images: Vec<String>,
    /// Accepted for compatibility, not analyzed
    #[serde(default)]
    pub video_url: Option<String>,
}

impl AnalysisRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Reject blank text and text longer than MAX_TEXT_CHARS characters.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.text.trim().is_empty() {
            return Err(InputError::EmptyText);
        }
        let len = self.text.chars().count();
        if len > MAX_TEXT_CHARS {
            return Err(InputError::TextTooLong {
                len,
                max: MAX_TEXT_CHARS,
            });
        }
        Ok(())
    }

    /// The image that will be analyzed, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}
