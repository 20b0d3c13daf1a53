//! Artistly backend library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use axum::{extract::Request, middleware::Next, response::Response, Router};
use chrono::{DateTime, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use sqlx::SqlitePool;
use std::num::NonZeroU32;
use std::sync::Arc;
use storage::ImageStore;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Artist record store
    pub db: SqlitePool,
    /// Upload storage backend
    pub storage: Arc<ImageStore>,
    /// Global API rate limiter; `None` disables limiting
    pub rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, storage: Arc<ImageStore>) -> Self {
        Self {
            db,
            storage,
            rate_limiter: None,
            startup_time: Utc::now(),
        }
    }

    /// Enable a global rate limit on `/api` routes. Zero disables it.
    pub fn with_rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limiter = NonZeroU32::new(per_minute)
            .map(|n| Arc::new(RateLimiter::direct(Quota::per_minute(n))));
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        // UI pages and embedded assets
        .merge(api::ui_routes())
        // REST API
        .merge(api::artist_routes())
        .merge(api::upload_routes())
        .merge(api::status_routes());

    // Serve locally stored uploads when using disk storage
    if let Some(dir) = state.storage.local_dir() {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON 404 for unmatched routes.
async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Reject `/api` requests over the global quota with 429.
async fn rate_limit_middleware(
    axum::extract::State(state): axum::extract::State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        if request.uri().path().starts_with("/api") && limiter.check().is_err() {
            return axum::response::IntoResponse::into_response(ApiError::TooManyRequests);
        }
    }
    next.run(request).await
}
