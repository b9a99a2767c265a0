// Credibility status bands.
//
// Status, message, and color are a fixed function of the clamped score.
// The bands are exhaustive and mutually exclusive: >=70, 40-69, <40.

use serde::{Deserialize, Serialize};

/// The three credibility bands a score can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredibilityStatus {
    #[serde(rename = "Likely Reliable")]
    LikelyReliable,
    #[serde(rename = "Needs Verification")]
    NeedsVerification,
    #[serde(rename = "Potentially Misleading")]
    PotentiallyMisleading,
}

impl CredibilityStatus {
    /// Determine the band from a credibility score (0-100).
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => CredibilityStatus::LikelyReliable,
            s if s >= 40 => CredibilityStatus::NeedsVerification,
            _ => CredibilityStatus::PotentiallyMisleading,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityStatus::LikelyReliable => "Likely Reliable",
            CredibilityStatus::NeedsVerification => "Needs Verification",
            CredibilityStatus::PotentiallyMisleading => "Potentially Misleading",
        }
    }

    /// Human-readable explanation shown next to the score.
    pub fn message(&self) -> &'static str {
        match self {
            CredibilityStatus::LikelyReliable => {
                "This content appears credible based on language and structural analysis."
            }
            CredibilityStatus::NeedsVerification => {
                "Mixed signals detected. Verify with multiple trusted sources before sharing."
            }
            CredibilityStatus::PotentiallyMisleading => {
                "Potential misinformation detected. Please verify carefully before believing or sharing."
            }
        }
    }

    /// Display color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            CredibilityStatus::LikelyReliable => "#00ba7c",
            CredibilityStatus::NeedsVerification => "#f59e0b",
            CredibilityStatus::PotentiallyMisleading => "#ef4444",
        }
    }
}

impl std::fmt::Display for CredibilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&CredibilityStatus::NeedsVerification).unwrap();
        assert_eq!(json, "\"Needs Verification\"");
    }

    #[test]
    fn test_colors_are_distinct() {
        let colors = [
            CredibilityStatus::LikelyReliable.color(),
            CredibilityStatus::NeedsVerification.color(),
            CredibilityStatus::PotentiallyMisleading.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
