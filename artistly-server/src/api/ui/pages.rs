//! HTML page handlers

use axum::response::{Html, IntoResponse};

/// Wrap page content in the shared shell (header, nav, styles).
fn page_shell(title: &str, active: &str, body: &str, script: &str) -> String {
    let nav_link = |href: &str, label: &str, key: &str| {
        if key == active {
            format!("<a href=\"{}\" class=\"active\">{}</a>", href, label)
        } else {
            format!("<a href=\"{}\">{}</a>", href, label)
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Artistly</title>
    <link rel="stylesheet" href="/static/artistly.css">
</head>
<body>
    <header>
        <h1>Artistly <span class="subtitle">v{version}</span></h1>
        <p class="subtitle">Book performing artists for your events</p>
        <nav>
            {browse}
            {onboarding}
            {dashboard}
        </nav>
    </header>
    <div class="content">
{body}
    </div>
    <script src="/static/app.js"></script>
    <script src="/static/{script}"></script>
</body>
</html>"#,
        title = title,
        version = env!("CARGO_PKG_VERSION"),
        browse = nav_link("/artists", "Browse", "browse"),
        onboarding = nav_link("/onboarding", "Onboarding", "onboarding"),
        dashboard = nav_link("/dashboard", "Dashboard", "dashboard"),
        body = body,
        script = script,
    )
}

/// GET /artists
///
/// Filterable artist card grid.
pub async fn browse_page() -> impl IntoResponse {
    Html(page_shell(
        "Browse Artists",
        "browse",
        r#"        <div class="filters">
            <select id="filter-category"><option value="all">All Categories</option></select>
            <select id="filter-location"><option value="all">All Locations</option></select>
            <select id="filter-price"><option value="all">All Price Ranges</option></select>
        </div>
        <p id="browse-status" class="status"></p>
        <button id="browse-retry" class="button" style="display:none">Try again</button>
        <div id="artist-grid" class="card-grid"></div>"#,
        "browse.js",
    ))
}

/// GET /onboarding
///
/// 3-step artist onboarding wizard.
pub async fn onboarding_page() -> impl IntoResponse {
    Html(page_shell(
        "Artist Onboarding",
        "onboarding",
        r#"        <div id="wizard-steps" class="wizard-steps"></div>
        <div id="wizard-body"></div>
        <div class="wizard-nav">
            <button id="wizard-back" class="button secondary">Back</button>
            <button id="wizard-next" class="button">Next</button>
        </div>
        <p id="wizard-status" class="status"></p>"#,
        "onboarding.js",
    ))
}

/// GET /dashboard
///
/// Artist management table.
pub async fn dashboard_page() -> impl IntoResponse {
    Html(page_shell(
        "Dashboard",
        "dashboard",
        r#"        <p id="dashboard-status" class="status"></p>
        <button id="dashboard-retry" class="button" style="display:none">Try again</button>
        <table>
            <thead>
                <tr><th>Name</th><th>Category</th><th>Location</th><th>Fee</th><th>Actions</th></tr>
            </thead>
            <tbody id="dashboard-rows"></tbody>
        </table>"#,
        "dashboard.js",
    ))
}
