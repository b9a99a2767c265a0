// GET / and GET /health: liveness plus classifier state.
//
// The model status reads the augmenter's tri-state without triggering a
// load, so polling these endpoints never pays for model acquisition.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::web::AppState;

/// GET /: service banner.
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Credence credibility API",
        "status": "running",
        "model_status": state.pipeline.sentiment_status(),
        "model_detail": state.pipeline.sentiment_status().as_str(),
        "image_analysis": state.pipeline.image_analysis_enabled(),
        "started_at": state.started_at,
    }))
}

/// GET /health: always 200 while the process is serving.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "model_status": state.pipeline.sentiment_status(),
    }))
}
