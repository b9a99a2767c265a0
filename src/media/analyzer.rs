// Image authenticity pipeline: fetch, decode, measure, analyze faces, score.
//
// The decoded image is written to a NamedTempFile that lives only for the
// face-analysis step. The file is removed when the guard drops, on success,
// on an early `?` return, and while unwinding.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use reqwest::{Client, StatusCode};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::authenticity::{score_authenticity, ImageAuthenticityResult};
use super::face::{FaceAnalysis, FaceAnalyzer};
use super::metrics::ImageMetrics;

/// Hard timeout for the image fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Images larger than this are not analyzed.
const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;

pub struct ImageAuthenticityAnalyzer {
    client: Client,
    face_analyzer: Arc<dyn FaceAnalyzer>,
}

impl ImageAuthenticityAnalyzer {
    pub fn new(face_analyzer: Arc<dyn FaceAnalyzer>, fetch_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(fetch_timeout)
            .user_agent(concat!("credence/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            face_analyzer,
        })
    }

    /// Analyze the image at `url`. Any failure is logged and yields None.
    pub async fn analyze(&self, url: &str) -> Option<ImageAuthenticityResult> {
        match self.try_analyze(url).await {
            Ok(result) => {
                debug!(
                    url,
                    score = result.authenticity_score,
                    status = result.status.as_str(),
                    "Image analyzed"
                );
                Some(result)
            }
            Err(e) => {
                warn!(url, error = %e, "Image authenticity analysis failed");
                None
            }
        }
    }

    async fn try_analyze(&self, url: &str) -> Result<ImageAuthenticityResult> {
        let bytes = self.fetch(url).await?;

        // Decoding, measuring and encoding the scratch file are CPU-bound
        let (metrics, scratch) = tokio::task::spawn_blocking(move || -> Result<_> {
            let img = image::load_from_memory(&bytes)
                .context("Failed to decode image")?
                .to_rgb8();
            let metrics = ImageMetrics::measure(&img);
            let scratch = write_scratch_file(&img)?;
            Ok((metrics, scratch))
        })
        .await
        .context("spawn_blocking panicked")??;

        let face = self.analyze_faces(scratch).await?;

        Ok(score_authenticity(&face, &metrics))
    }

    /// Run face analysis over the scratch file, consuming (and deleting) it.
    ///
    /// A failed cleanup is logged and never replaces the analysis outcome.
    async fn analyze_faces(&self, scratch: NamedTempFile) -> Result<FaceAnalysis> {
        let result = self.face_analyzer.analyze(scratch.path()).await;
        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            warn!(
                path = %scratch_path.display(),
                error = %e,
                "Failed to remove temporary image file"
            );
        }
        result
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch image {}", url))?;

        if response.status() != StatusCode::OK {
            anyhow::bail!("Image fetch returned {}", response.status());
        }
        if response
            .content_length()
            .is_some_and(|len| len as usize > MAX_IMAGE_BYTES)
        {
            anyhow::bail!("Image exceeds {} bytes", MAX_IMAGE_BYTES);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read image body")?;
        if bytes.len() > MAX_IMAGE_BYTES {
            anyhow::bail!("Image exceeds {} bytes", MAX_IMAGE_BYTES);
        }
        Ok(bytes.to_vec())
    }
}

/// Persist `img` as PNG to a fresh temporary file.
fn write_scratch_file(img: &RgbImage) -> Result<NamedTempFile> {
    let scratch = tempfile::Builder::new()
        .prefix("credence-")
        .suffix(".png")
        .tempfile()
        .context("Failed to create temporary image file")?;
    save_png(img, scratch.path())?;
    Ok(scratch)
}

fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}
