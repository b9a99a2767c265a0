// System status display: shows sentiment model files and image analysis setup.

use std::path::Path;

use crate::config::{Config, SentimentBackend};
use crate::sentiment::download::{model_files_present, MODEL_FILE};

/// Display system status to the terminal.
pub fn show(config: &Config) {
    match config.sentiment_backend {
        SentimentBackend::Off => println!("Sentiment: disabled (CREDENCE_SENTIMENT=off)"),
        SentimentBackend::Onnx => {
            if model_files_present(&config.model_dir) {
                let size = std::fs::metadata(config.model_dir.join(MODEL_FILE))
                    .map(|m| format_bytes(m.len()))
                    .unwrap_or_else(|_| "unknown".to_string());
                println!(
                    "Sentiment: ONNX model present in {} ({})",
                    config.model_dir.display(),
                    size
                );
            } else if config.model_auto_download {
                println!(
                    "Sentiment: model missing, will download to {} on first use",
                    config.model_dir.display()
                );
            } else {
                println!(
                    "Sentiment: model missing in {}",
                    display_dir(&config.model_dir)
                );
                println!("  Run `credence download-model` to enable sentiment refinement");
            }
        }
    }

    match &config.face_api_url {
        Some(url) => println!("Image analysis: enabled (face API at {url})"),
        None => {
            println!("Image analysis: disabled");
            println!("  Set CREDENCE_FACE_API_URL to a DeepFace-compatible service to enable it");
        }
    }

    println!(
        "Image fetch timeout: {}s",
        config.image_timeout.as_secs()
    );
}

fn display_dir(dir: &Path) -> String {
    if dir.exists() {
        dir.display().to_string()
    } else {
        format!("{} (does not exist)", dir.display())
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(67 * 1024 * 1024), "67.0 MB");
    }
}
