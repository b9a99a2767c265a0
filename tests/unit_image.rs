// Tests for the image authenticity analyzer and the face-analysis client.
//
// A wiremock server stands in for the image host and the DeepFace API.
// The fake face analyzer records the scratch file path it was given so the
// tests can check the file existed during analysis and is gone afterwards.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use credence::media::{
    AuthenticityStatus, DeepFaceClient, FaceAnalysis, FaceAnalyzer, FaceRegion,
    ImageAuthenticityAnalyzer,
};

/// A noisy, colorful test image: sharp enough and with natural color spread.
fn sample_png() -> Vec<u8> {
    let img = RgbImage::from_fn(64, 64, |x, y| {
        let v = ((x * 37 + y * 91) % 256) as u8;
        Rgb([v, v.wrapping_mul(3), 255 - v])
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Records the scratch path and whether it existed at call time.
struct RecordingFaceAnalyzer {
    seen: Mutex<Option<(PathBuf, bool)>>,
    fail: bool,
}

impl RecordingFaceAnalyzer {
    fn new(fail: bool) -> Self {
        Self {
            seen: Mutex::new(None),
            fail,
        }
    }

    fn seen(&self) -> Option<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaceAnalyzer for RecordingFaceAnalyzer {
    async fn analyze(&self, image_path: &Path) -> Result<FaceAnalysis> {
        *self.seen.lock().unwrap() = Some((image_path.to_path_buf(), image_path.exists()));
        if self.fail {
            anyhow::bail!("face service exploded");
        }
        Ok(FaceAnalysis {
            region: Some(FaceRegion {
                x: 4.0,
                y: 4.0,
                w: 40.0,
                h: 48.0,
            }),
            emotion: [("happy".to_string(), 91.0)].into_iter().collect(),
            dominant_emotion: Some("happy".to_string()),
            age: Some(34.0),
            dominant_gender: Some("Woman".to_string()),
        })
    }
}

async fn serve_image(server: &MockServer, bytes: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
        .mount(server)
        .await;
}

// ============================================================
// Analyzer: fail-open paths
// ============================================================

#[tokio::test]
async fn fetch_404_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let face = Arc::new(RecordingFaceAnalyzer::new(false));
    let analyzer = ImageAuthenticityAnalyzer::new(face.clone(), Duration::from_secs(10)).unwrap();

    let result = analyzer
        .analyze(&format!("{}/missing.jpg", server.uri()))
        .await;
    assert!(result.is_none());
    assert!(face.seen().is_none(), "face analysis must not run");
}

#[tokio::test]
async fn undecodable_body_yields_none() {
    let server = MockServer::start().await;
    serve_image(&server, b"<html>not an image</html>".to_vec()).await;

    let face = Arc::new(RecordingFaceAnalyzer::new(false));
    let analyzer = ImageAuthenticityAnalyzer::new(face.clone(), Duration::from_secs(10)).unwrap();

    assert!(analyzer
        .analyze(&format!("{}/photo.png", server.uri()))
        .await
        .is_none());
    assert!(face.seen().is_none());
}

#[tokio::test]
async fn slow_fetch_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(sample_png())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let face = Arc::new(RecordingFaceAnalyzer::new(false));
    let analyzer =
        ImageAuthenticityAnalyzer::new(face.clone(), Duration::from_millis(100)).unwrap();

    assert!(analyzer
        .analyze(&format!("{}/photo.png", server.uri()))
        .await
        .is_none());
}

#[tokio::test]
async fn unreachable_host_yields_none() {
    let face = Arc::new(RecordingFaceAnalyzer::new(false));
    let analyzer = ImageAuthenticityAnalyzer::new(face, Duration::from_secs(2)).unwrap();
    assert!(analyzer
        .analyze("http://127.0.0.1:9/nothing.png")
        .await
        .is_none());
}

// ============================================================
// Analyzer: scratch file lifetime
// ============================================================

#[tokio::test]
async fn scratch_file_removed_after_success() {
    let server = MockServer::start().await;
    serve_image(&server, sample_png()).await;

    let face = Arc::new(RecordingFaceAnalyzer::new(false));
    let analyzer = ImageAuthenticityAnalyzer::new(face.clone(), Duration::from_secs(10)).unwrap();

    let result = analyzer
        .analyze(&format!("{}/photo.png", server.uri()))
        .await
        .expect("analysis should succeed");

    let (scratch, existed) = face.seen().expect("face analysis should run");
    assert!(existed, "scratch file must exist during face analysis");
    assert!(!scratch.exists(), "scratch file must be removed afterwards");

    assert!(result.face_detected);
    assert_eq!(result.dominant_emotion, "happy");
    assert_eq!(result.estimated_age, 34);
    assert!(result.authenticity_score <= 100);
    assert_eq!(result.deepfake_detected, result.authenticity_score < 40);
}

#[tokio::test]
async fn scratch_file_removed_after_face_failure() {
    let server = MockServer::start().await;
    serve_image(&server, sample_png()).await;

    let face = Arc::new(RecordingFaceAnalyzer::new(true));
    let analyzer = ImageAuthenticityAnalyzer::new(face.clone(), Duration::from_secs(10)).unwrap();

    let result = analyzer
        .analyze(&format!("{}/photo.png", server.uri()))
        .await;
    assert!(result.is_none());

    let (scratch, existed) = face.seen().expect("face analysis should run");
    assert!(existed);
    assert!(!scratch.exists());
}

#[tokio::test]
async fn cleanup_failure_keeps_face_result() {
    let server = MockServer::start().await;
    serve_image(&server, sample_png()).await;

    // Removes the scratch file itself, so the analyzer's own cleanup fails
    struct DeletingFace;
    #[async_trait]
    impl FaceAnalyzer for DeletingFace {
        async fn analyze(&self, image_path: &Path) -> Result<FaceAnalysis> {
            std::fs::remove_file(image_path)?;
            Ok(FaceAnalysis {
                dominant_emotion: Some("neutral".to_string()),
                ..FaceAnalysis::default()
            })
        }
    }

    let analyzer =
        ImageAuthenticityAnalyzer::new(Arc::new(DeletingFace), Duration::from_secs(10)).unwrap();
    let result = analyzer
        .analyze(&format!("{}/photo.png", server.uri()))
        .await
        .expect("face result should survive a failed cleanup");
    assert_eq!(result.dominant_emotion, "neutral");
}

#[tokio::test]
async fn flat_image_without_face_scores_high_risk() {
    let server = MockServer::start().await;
    let img = RgbImage::from_pixel(32, 32, Rgb([128, 128, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    serve_image(&server, buf.into_inner()).await;

    struct NoFace;
    #[async_trait]
    impl FaceAnalyzer for NoFace {
        async fn analyze(&self, _image_path: &Path) -> Result<FaceAnalysis> {
            Ok(FaceAnalysis::default())
        }
    }

    let analyzer =
        ImageAuthenticityAnalyzer::new(Arc::new(NoFace), Duration::from_secs(10)).unwrap();
    let result = analyzer
        .analyze(&format!("{}/photo.png", server.uri()))
        .await
        .expect("analysis should succeed");

    // No face, zero sharpness, gray has tiny HSV spread: 0 - 10 -> clamped 0
    assert_eq!(result.authenticity_score, 0);
    assert_eq!(result.status, AuthenticityStatus::PotentialManipulation);
    assert!(result.deepfake_detected);
    assert!(!result.face_detected);
}

// ============================================================
// DeepFaceClient
// ============================================================

#[tokio::test]
async fn deepface_client_parses_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .and(body_partial_json(json!({
            "enforce_detection": false,
            "actions": ["emotion", "age", "gender"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "region": {"x": 5, "y": 6, "w": 70, "h": 80},
                "emotion": {"neutral": 64.2, "happy": 20.0},
                "dominant_emotion": "neutral",
                "age": 41,
                "dominant_gender": "Man",
                "face_confidence": 0.91
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("face.png");
    std::fs::write(&file, sample_png()).unwrap();

    let client = DeepFaceClient::new(&server.uri()).unwrap();
    let analysis = client.analyze(&file).await.unwrap();

    assert_eq!(analysis.region.as_ref().map(|r| r.w), Some(70.0));
    assert_eq!(analysis.dominant_emotion.as_deref(), Some("neutral"));
    assert_eq!(analysis.age, Some(41.0));
    assert_eq!(analysis.dominant_emotion_score(), Some(64.2));
}

#[tokio::test]
async fn deepface_client_error_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("face.png");
    std::fs::write(&file, sample_png()).unwrap();

    let client = DeepFaceClient::new(&server.uri()).unwrap();
    let err = client.analyze(&file).await.unwrap_err();
    assert!(err.to_string().contains("500"));
}
