// Authenticity heuristics: five independent checks folded into a score.
//
// Starts at 0 and accumulates:
//   face detected            +30
//   sharpness > 100          +20, else -10
//   face width > 0           +15
//   dominant emotion > 50    +20, else -5 (only if emotions were reported)
//   30 < HSV std-dev < 80    +15
// then clamps to 0-100 and bands: >=70 Low risk, 40-69 Medium, <40 High.

use serde::Serialize;

use super::face::FaceAnalysis;
use super::metrics::ImageMetrics;

const FACE_DETECTED_WEIGHT: i32 = 30;
const SHARPNESS_WEIGHT: i32 = 20;
const SHARPNESS_PENALTY: i32 = 10;
const SHARPNESS_THRESHOLD: f64 = 100.0;
const FACE_PROPORTION_WEIGHT: i32 = 15;
const EMOTION_WEIGHT: i32 = 20;
const EMOTION_PENALTY: i32 = 5;
const EMOTION_THRESHOLD: f64 = 50.0;
const COLOR_WEIGHT: i32 = 15;
const COLOR_STD_RANGE: (f64, f64) = (30.0, 80.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthenticityStatus {
    #[serde(rename = "Likely Authentic")]
    LikelyAuthentic,
    Inconclusive,
    #[serde(rename = "Potential Manipulation")]
    PotentialManipulation,
}

impl AuthenticityStatus {
    /// Band an authenticity score (0-100) into status and risk.
    pub fn from_score(score: u8) -> (Self, RiskLevel) {
        match score {
            s if s >= 70 => (AuthenticityStatus::LikelyAuthentic, RiskLevel::Low),
            s if s >= 40 => (AuthenticityStatus::Inconclusive, RiskLevel::Medium),
            _ => (AuthenticityStatus::PotentialManipulation, RiskLevel::High),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticityStatus::LikelyAuthentic => "Likely Authentic",
            AuthenticityStatus::Inconclusive => "Inconclusive",
            AuthenticityStatus::PotentialManipulation => "Potential Manipulation",
        }
    }
}

/// Heuristic authenticity verdict for one image. Indicative only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAuthenticityResult {
    pub authenticity_score: u8,
    pub risk_level: RiskLevel,
    pub status: AuthenticityStatus,
    /// score < 40
    pub deepfake_detected: bool,
    pub face_detected: bool,
    /// One line per check, in check order
    pub indicators: Vec<String>,
    pub dominant_emotion: String,
    pub estimated_age: u32,
    pub dominant_gender: String,
}

/// Run the five checks over a face analysis and pixel metrics.
pub fn score_authenticity(face: &FaceAnalysis, metrics: &ImageMetrics) -> ImageAuthenticityResult {
    let mut score = 0;
    let mut indicators = Vec::new();

    if face.region.is_some() {
        score += FACE_DETECTED_WEIGHT;
        indicators.push("Face detected clearly".to_string());
    } else {
        indicators.push("Face detection unclear".to_string());
    }

    if metrics.sharpness > SHARPNESS_THRESHOLD {
        score += SHARPNESS_WEIGHT;
        indicators.push("Image sharpness normal".to_string());
    } else {
        score -= SHARPNESS_PENALTY;
        indicators.push("Unusual image quality detected".to_string());
    }

    if face.region.as_ref().is_some_and(|r| r.w > 0.0) {
        score += FACE_PROPORTION_WEIGHT;
        indicators.push("Face proportions normal".to_string());
    }

    if let Some(dominant) = face.dominant_emotion_score() {
        if dominant > EMOTION_THRESHOLD {
            score += EMOTION_WEIGHT;
            indicators.push("Emotion expression natural".to_string());
        } else {
            score -= EMOTION_PENALTY;
            indicators.push("Mixed emotion signals".to_string());
        }
    }

    let (lo, hi) = COLOR_STD_RANGE;
    if metrics.color_std > lo && metrics.color_std < hi {
        score += COLOR_WEIGHT;
        indicators.push("Color distribution natural".to_string());
    } else {
        indicators.push("Unusual color patterns".to_string());
    }

    let score = score.clamp(0, 100) as u8;
    let (status, risk_level) = AuthenticityStatus::from_score(score);

    ImageAuthenticityResult {
        authenticity_score: score,
        risk_level,
        status,
        deepfake_detected: score < 40,
        face_detected: face.region.is_some(),
        indicators,
        dominant_emotion: face
            .dominant_emotion
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
        estimated_age: face.age.map(|a| a.max(0.0) as u32).unwrap_or(0),
        dominant_gender: face
            .dominant_gender
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
    }
}
