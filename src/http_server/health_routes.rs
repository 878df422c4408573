//! Health HTTP Routes
//!
//! Liveness text at `/` and a JSON health check at `/health`.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Plain-text liveness body served at `/`
pub const LIVENESS_TEXT: &str = "Server working correctly";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create health routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/health", get(health_handler))
}

async fn liveness_handler() -> &'static str {
    LIVENESS_TEXT
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
