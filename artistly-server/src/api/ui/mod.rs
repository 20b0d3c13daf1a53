//! Server-rendered UI pages
//!
//! Each page is an HTML shell rendered by the backend; the page scripts
//! call the REST API through the shared `app.js` data layer.

pub mod pages;
pub mod static_assets;

use axum::{routing::get, Router};

use crate::AppState;

/// Build UI routes (pages plus embedded static assets)
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(pages::browse_page))
        .route("/onboarding", get(pages::onboarding_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/static/artistly.css", get(static_assets::serve_css))
        .route("/static/app.js", get(static_assets::serve_app_js))
        .route("/static/browse.js", get(static_assets::serve_browse_js))
        .route(
            "/static/onboarding.js",
            get(static_assets::serve_onboarding_js),
        )
        .route(
            "/static/dashboard.js",
            get(static_assets::serve_dashboard_js),
        )
}
