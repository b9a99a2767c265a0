// Colored terminal output for a single analysis.
//
// The CLI `analyze` command delegates here. Colors mirror the status
// colors in the JSON response: green, amber, red.

use colored::Colorize;
use serde_json::Value;

use crate::pipeline::AnalysisResponse;
use crate::scoring::CredibilityStatus;

/// Display an analysis result in the terminal.
pub fn display_analysis(response: &AnalysisResponse) {
    println!("\n{}", "=== Credibility Analysis ===".bold());
    println!(
        "  Score:  {}/100  {}",
        response.score,
        colorize_status(response.status)
    );
    println!("  {}", response.message.dimmed());

    let d = &response.details;

    println!("\n  Text signals:");
    println!(
        "    Words: {}  |  Sources: {}  |  Links: {}",
        field(d, "word_count"),
        yes_no(d, "has_sources", false),
        yes_no(d, "has_urls", false),
    );
    println!(
        "    Clickbait: {}  |  All caps: {}  |  !: {}  ?: {}",
        yes_no(d, "has_clickbait", true),
        yes_no(d, "has_all_caps", true),
        field(d, "exclamation_count"),
        field(d, "question_count"),
    );
    println!(
        "    Reliable indicators: {}  |  Suspicious words: {}",
        field(d, "reliable_indicators"),
        field(d, "suspicious_words"),
    );

    if let Some(label) = d.get("ai_sentiment").and_then(Value::as_str) {
        let confidence = d.get("ai_confidence").and_then(Value::as_f64).unwrap_or(0.0);
        println!("\n  Sentiment: {} ({:.0}%)", label, confidence * 100.0);
    }

    if let Some(score) = d.get("authenticity_score") {
        println!("\n  Image authenticity: {}/100 ({})", score, field(d, "image_status"));
        println!(
            "    Face: {}  |  Emotion: {}  |  Age: {}  |  Gender: {}",
            yes_no(d, "face_detected", false),
            field(d, "face_emotion"),
            field(d, "face_age"),
            field(d, "face_gender"),
        );
        if let Some(indicators) = d.get("deepfake_indicators").and_then(Value::as_array) {
            for indicator in indicators.iter().filter_map(Value::as_str) {
                println!("    - {}", indicator.dimmed());
            }
        }
        println!(
            "    {}",
            "Image checks are heuristic and indicative only.".dimmed()
        );
    }
    println!();
}

/// Render a detail value without JSON string quotes.
fn field(details: &serde_json::Map<String, Value>, key: &str) -> String {
    match details.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "?".to_string(),
    }
}

/// Render a boolean detail. `bad` marks flags where "yes" is a warning.
fn yes_no(
    details: &serde_json::Map<String, Value>,
    key: &str,
    bad: bool,
) -> colored::ColoredString {
    match (details.get(key).and_then(Value::as_bool), bad) {
        (Some(true), true) => "yes".red(),
        (Some(true), false) => "yes".green(),
        (Some(false), _) => "no".normal(),
        (None, _) => "?".dimmed(),
    }
}

/// Colorize a credibility status.
fn colorize_status(status: CredibilityStatus) -> colored::ColoredString {
    match status {
        CredibilityStatus::LikelyReliable => status.as_str().green().bold(),
        CredibilityStatus::NeedsVerification => status.as_str().yellow(),
        CredibilityStatus::PotentiallyMisleading => status.as_str().red().bold(),
    }
}
