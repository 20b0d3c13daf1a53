//! Status endpoints

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

/// API index / health payload
#[derive(Debug, Serialize)]
pub struct ApiIndexResponse {
    pub message: String,
    pub endpoints: Vec<String>,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
}

/// GET /
///
/// Plain-text liveness check.
pub async fn root_status() -> &'static str {
    "Artistly backend is running"
}

/// GET /api
///
/// Lists the API surface plus version and uptime for monitoring.
pub async fn api_index(State(state): State<AppState>) -> Json<ApiIndexResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    Json(ApiIndexResponse {
        message: "Artistly API".to_string(),
        endpoints: vec!["/api/artists".to_string(), "/api/upload".to_string()],
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    })
}

/// Build status routes
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_status))
        .route("/api", get(api_index))
        .route(
            "/api/placeholder/:width/:height",
            get(super::placeholder::placeholder_image),
        )
}
