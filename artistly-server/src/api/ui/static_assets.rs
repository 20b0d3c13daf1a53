//! Static asset handlers
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const ARTISTLY_CSS: &str = include_str!("../../../static/artistly.css");
const APP_JS: &str = include_str!("../../../static/app.js");
const BROWSE_JS: &str = include_str!("../../../static/browse.js");
const ONBOARDING_JS: &str = include_str!("../../../static/onboarding.js");
const DASHBOARD_JS: &str = include_str!("../../../static/dashboard.js");

fn asset(content_type: &'static str, body: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", content_type),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        body,
    )
        .into_response()
}

/// GET /static/artistly.css
pub async fn serve_css() -> Response {
    asset("text/css", ARTISTLY_CSS)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    asset("application/javascript", APP_JS)
}

/// GET /static/browse.js
pub async fn serve_browse_js() -> Response {
    asset("application/javascript", BROWSE_JS)
}

/// GET /static/onboarding.js
pub async fn serve_onboarding_js() -> Response {
    asset("application/javascript", ONBOARDING_JS)
}

/// GET /static/dashboard.js
pub async fn serve_dashboard_js() -> Response {
    asset("application/javascript", DASHBOARD_JS)
}
