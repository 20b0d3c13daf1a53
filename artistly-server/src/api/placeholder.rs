//! Artist-themed SVG placeholder images
//!
//! Serves the default image reference given to artists created without a
//! photo.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ApiResult};

/// Largest accepted dimension.
const MAX_DIMENSION: u32 = 2000;

/// GET /api/placeholder/:width/:height
pub async fn placeholder_image(Path((width, height)): Path<(u32, u32)>) -> ApiResult<Response> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ApiError::BadRequest(format!(
            "Placeholder dimensions must be between 1 and {}",
            MAX_DIMENSION
        )));
    }

    let svg = render_svg(width, height);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        svg,
    )
        .into_response())
}

fn render_svg(width: u32, height: u32) -> String {
    let w = width as f32;
    let h = height as f32;

    format!(
        r##"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="#f8fafc"/>
      <stop offset="100%" stop-color="#e2e8f0"/>
    </linearGradient>
  </defs>
  <rect width="100%" height="100%" fill="url(#bg)"/>
  <circle cx="50%" cy="35%" r="25" fill="#cbd5e1" opacity="0.7"/>
  <circle cx="50%" cy="32%" r="12" fill="#94a3b8"/>
  <ellipse cx="50%" cy="50%" rx="20" ry="12" fill="#94a3b8"/>
  <circle cx="{mic_x}" cy="{mic_y}" r="8" fill="#8b5cf6" opacity="0.6"/>
  <rect x="{mic_stem_x}" y="{mic_stem_y}" width="2" height="15" fill="#8b5cf6" opacity="0.6"/>
  <circle cx="{note_x}" cy="{note_y}" r="3" fill="#f59e0b" opacity="0.7"/>
  <text x="50%" y="75%" font-family="system-ui, sans-serif" font-size="14" font-weight="500" text-anchor="middle" fill="#64748b">Artist Photo</text>
  <text x="50%" y="85%" font-family="system-ui, sans-serif" font-size="11" text-anchor="middle" fill="#94a3b8">{width} x {height}</text>
</svg>
"##,
        width = width,
        height = height,
        mic_x = w * 0.7,
        mic_y = h * 0.3,
        mic_stem_x = w * 0.7 - 1.0,
        mic_stem_y = h * 0.3 + 8.0,
        note_x = w * 0.25,
        note_y = h * 0.25,
    )
}
