//! Health check handlers.

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Liveness only; upstreams are not probed.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
