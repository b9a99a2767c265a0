// POST /analyze: score a post for credibility.
//
// Returns 200 with the AnalysisResponse, or 400 when the text is missing,
// blank, or longer than 5000 characters. Image and sentiment failures
// never change the status code.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::pipeline::AnalysisRequest;
use crate::web::{api_error, AppState};

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match state.pipeline.analyze(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    }
}
