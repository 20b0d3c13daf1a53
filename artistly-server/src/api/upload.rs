//! Image upload endpoint
//!
//! Accepts a single multipart file field named "file", validates type and
//! size, and hands the bytes to the configured storage backend. The
//! returned reference is stored on the artist by a separate create/update
//! call; there is no combined transaction.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use artistly_common::model::UploadResponse;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Maximum accepted file size (5MB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for the upload route. Larger than the file cap so
/// an oversized file reaches the handler and gets the size-specific
/// message instead of a generic body-too-large rejection.
const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Allowed image extensions / MIME subtypes.
const ALLOWED_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// POST /api/upload
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Upload error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        if !is_allowed_type(&original_name, &mimetype) {
            return Err(ApiError::BadRequest(
                "Only image files (JPEG, JPG, PNG, GIF, WebP) are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Upload error: {}", e)))?;

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(ApiError::BadRequest(
                "File too large. Maximum size is 5MB".to_string(),
            ));
        }

        let stored = state.storage.store(&original_name, &mimetype, &data).await?;
        tracing::info!("File uploaded successfully: {}", stored.filename);

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: stored.filename,
            path: stored.path,
            url: stored.url,
            size: data.len() as u64,
            mimetype,
        }));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

/// Both the extension and the declared MIME type must look like one of
/// the allowed image formats.
fn is_allowed_type(original_name: &str, mimetype: &str) -> bool {
    let extension_ok = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_TYPES.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    let mime_ok = mimetype
        .strip_prefix("image/")
        .map(|subtype| ALLOWED_TYPES.contains(&subtype.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    extension_ok && mime_ok
}

/// Build upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new().route(
        "/api/upload",
        post(upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
    )
}
