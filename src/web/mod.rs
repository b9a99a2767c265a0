// Web server: Axum transport for the analysis pipeline.
//
// Thin plumbing: JSON in, JSON out. All scoring happens in the pipeline.
// CORS is wide open so browser extensions on any origin can call it.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pipeline::CredibilityPipeline;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CredibilityPipeline>,
    /// RFC 3339 server start time
    pub started_at: String,
}

impl AppState {
    pub fn new(pipeline: CredibilityPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            started_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(pipeline: CredibilityPipeline, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState::new(pipeline));

    let addr = format!("{bind}:{port}");
    info!("Credence API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health))
        .route("/analyze", post(handlers::analyze::analyze))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
