// Face analysis: trait plus a client for a DeepFace-compatible HTTP API.
//
// The analyzer hands over a local image path. "No face found" is a normal
// result (region = None), never an error; errors mean the service itself
// failed. The HTTP client sends the file as a base64 data URI with
// enforce_detection disabled, so the service answers even for faceless
// images.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bounding box of a detected face, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// What the face-analysis step reports about an image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceAnalysis {
    /// None when no face was detected
    pub region: Option<FaceRegion>,
    /// Emotion name to confidence, 0-100
    pub emotion: BTreeMap<String, f64>,
    pub dominant_emotion: Option<String>,
    pub age: Option<f64>,
    pub dominant_gender: Option<String>,
}

impl FaceAnalysis {
    /// Confidence of the strongest emotion, if any were reported.
    pub fn dominant_emotion_score(&self) -> Option<f64> {
        self.emotion.values().copied().reduce(f64::max)
    }
}

/// Trait for analyzing faces in a local image file.
#[async_trait]
pub trait FaceAnalyzer: Send + Sync {
    async fn analyze(&self, image_path: &Path) -> Result<FaceAnalysis>;
}

/// One face as returned by DeepFace's `/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepFaceFace {
    pub region: Option<DeepFaceRegion>,
    #[serde(default)]
    pub emotion: BTreeMap<String, f64>,
    pub dominant_emotion: Option<String>,
    pub age: Option<f64>,
    pub dominant_gender: Option<String>,
    /// 0 when detection was skipped and the region is the whole image
    pub face_confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeepFaceRegion {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
}

/// Response body variants seen across DeepFace API versions.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeepFaceResponse {
    Wrapped { results: Vec<DeepFaceFace> },
    List(Vec<DeepFaceFace>),
    Single(DeepFaceFace),
}

impl DeepFaceResponse {
    /// The first face, which is the only one scored.
    pub fn into_first(self) -> Option<DeepFaceFace> {
        match self {
            DeepFaceResponse::Wrapped { results } | DeepFaceResponse::List(results) => {
                results.into_iter().next()
            }
            DeepFaceResponse::Single(face) => Some(face),
        }
    }
}

impl From<DeepFaceFace> for FaceAnalysis {
    fn from(face: DeepFaceFace) -> Self {
        let detected = face.face_confidence.is_none_or(|c| c > 0.0);
        let region = face.region.filter(|_| detected).map(|r| FaceRegion {
            x: r.x.unwrap_or(0.0),
            y: r.y.unwrap_or(0.0),
            w: r.w.unwrap_or(0.0),
            h: r.h.unwrap_or(0.0),
        });

        FaceAnalysis {
            region,
            emotion: face.emotion,
            dominant_emotion: face.dominant_emotion,
            age: face.age,
            dominant_gender: face.dominant_gender,
        }
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    img: String,
    actions: [&'a str; 3],
    enforce_detection: bool,
}

/// Client for a DeepFace-compatible face-analysis service.
pub struct DeepFaceClient {
    client: Client,
    base_url: String,
}

impl DeepFaceClient {
    /// Create a new client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("credence/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FaceAnalyzer for DeepFaceClient {
    async fn analyze(&self, image_path: &Path) -> Result<FaceAnalysis> {
        let bytes = tokio::fs::read(image_path)
            .await
            .with_context(|| format!("Failed to read {}", image_path.display()))?;

        let request = AnalyzeRequest {
            img: data_uri(image_path, &bytes),
            actions: ["emotion", "age", "gender"],
            enforce_detection: false,
        };

        let url = format!("{}/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to call face-analysis API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Face-analysis API returned {}: {}", status, body);
        }

        let parsed: DeepFaceResponse = response
            .json()
            .await
            .context("Failed to parse face-analysis response")?;

        let analysis = parsed
            .into_first()
            .map(FaceAnalysis::from)
            .unwrap_or_default();

        debug!(
            face = analysis.region.is_some(),
            emotion = ?analysis.dominant_emotion,
            "Face analysis complete"
        );

        Ok(analysis)
    }
}

/// Encode file bytes as a data URI, typed by the file extension.
fn data_uri(path: &Path, bytes: &[u8]) -> String {
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
