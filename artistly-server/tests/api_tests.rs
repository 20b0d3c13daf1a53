//! Integration tests for the Artistly backend API
//!
//! Covers artist CRUD with filtering, the upload endpoint (type/size
//! validation, collision-resistant filenames, disk persistence), status
//! endpoints, the placeholder image and the API rate limit.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`

use artistly_server::storage::ImageStore;
use artistly_server::{build_router, AppState};

/// Test app over an in-memory database and a temp uploads directory.
/// The TempDir must stay alive for the duration of the test.
async fn setup_app() -> (Router, TempDir) {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    artistly_server::db::init_schema(&pool)
        .await
        .expect("Schema initialization failed");

    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Arc::new(ImageStore::LocalDisk {
        dir: dir.path().join("uploads"),
    });

    let app = build_router(AppState::new(pool, storage));
    (app, dir)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a multipart request with a single field.
fn multipart_request(uri: &str, field: &str, filename: &str, mime: &str, data: &[u8]) -> Request<Body> {
    let boundary = "artistly-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn create_artist(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/artists", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    extract_json(response.into_body()).await
}

// =============================================================================
// Status endpoints
// =============================================================================

#[tokio::test]
async fn test_root_status_is_plain_text() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Artistly backend is running");
}

#[tokio::test]
async fn test_api_index_lists_endpoints() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/api")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Artistly API");
    assert!(body["endpoints"]
        .as_array()
        .unwrap()
        .contains(&json!("/api/artists")));
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_placeholder_returns_svg() {
    let (app, _dir) = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/placeholder/400/300"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/svg+xml"
    );

    // Oversized dimensions are rejected
    let response = app.oneshot(get("/api/placeholder/9999/300")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_minimal_artist_gets_defaults() {
    let (app, _dir) = setup_app().await;

    let artist = create_artist(&app, json!({ "name": "  Asha Rao  " })).await;

    assert_eq!(artist["name"], "Asha Rao");
    assert!(!artist["id"].as_str().unwrap().is_empty());
    assert_eq!(artist["email"], "");
    assert_eq!(artist["category"], "");
    assert_eq!(artist["priceRange"], "");
    assert_eq!(artist["categories"], json!([]));
    assert_eq!(artist["image"], "/api/placeholder/400/300");
    assert!(!artist["createdAt"].as_str().unwrap().is_empty());
    assert_eq!(artist["createdAt"], artist["updatedAt"]);
}

#[tokio::test]
async fn test_create_blank_name_rejected() {
    let (app, _dir) = setup_app().await;

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "   " })] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/artists", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["message"], "Name is required");
    }
}

#[tokio::test]
async fn test_create_validation_errors_are_listed() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/artists",
            json!({ "name": "Asha", "email": "not-an-email" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Validation failed");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_create_is_not_idempotent() {
    let (app, _dir) = setup_app().await;

    let a = create_artist(&app, json!({ "name": "Asha" })).await;
    let b = create_artist(&app, json!({ "name": "Asha" })).await;
    assert_ne!(a["id"], b["id"]);

    let response = app.oneshot(get("/api/artists")).await.unwrap();
    let listed = extract_json(response.into_body()).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

// =============================================================================
// Get / round trip
// =============================================================================

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (app, _dir) = setup_app().await;

    let created = create_artist(
        &app,
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "category": "Singer",
            "categories": ["Singer", "Speaker"],
            "priceRange": "₹50K-1L",
            "location": "Mumbai",
            "languages": ["Hindi", "English"],
            "bio": "Playback singer.",
            "phone": "+91 98765 43210",
            "experience": "5+ years"
        }),
    )
    .await;

    let id = created["id"].as_str().unwrap();
    let response = app
        .oneshot(get(&format!("/api/artists/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = extract_json(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_and_malformed_ids() {
    let (app, _dir) = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/artists/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Artist not found");

    // Not a valid store key at all: BadRequest, not NotFound
    let response = app.oneshot(get("/api/artists/not-a-uuid")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// List filtering
// =============================================================================

async fn seed_three(app: &Router) {
    create_artist(
        app,
        json!({ "name": "A", "category": "DJ ", "location": "Mumbai", "priceRange": "₹50K-1L" }),
    )
    .await;
    create_artist(
        app,
        json!({ "name": "B", "category": "Singer", "location": "New Delhi", "priceRange": "₹1L-2L" }),
    )
    .await;
    create_artist(
        app,
        json!({ "name": "C", "category": "DJ", "location": "Pune", "priceRange": "₹50K-1L" }),
    )
    .await;
}

fn names(listed: &Value) -> Vec<String> {
    let mut names: Vec<String> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_list_without_filters_returns_all() {
    let (app, _dir) = setup_app().await;
    seed_three(&app).await;

    let response = app.oneshot(get("/api/artists")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = extract_json(response.into_body()).await;
    assert_eq!(names(&listed), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_list_filter_is_case_insensitive_substring() {
    let (app, _dir) = setup_app().await;
    seed_three(&app).await;

    // "dj" matches the stored "DJ " and "DJ"
    let response = app
        .clone()
        .oneshot(get("/api/artists?category=dj"))
        .await
        .unwrap();
    let listed = extract_json(response.into_body()).await;
    assert_eq!(names(&listed), vec!["A", "C"]);

    // Substring of location
    let response = app
        .clone()
        .oneshot(get("/api/artists?location=delhi"))
        .await
        .unwrap();
    let listed = extract_json(response.into_body()).await;
    assert_eq!(names(&listed), vec!["B"]);

    // No match is an empty 200, never an error
    let response = app
        .oneshot(get("/api/artists?category=Magician"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = extract_json(response.into_body()).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_all_sentinel_imposes_no_constraint() {
    let (app, _dir) = setup_app().await;
    seed_three(&app).await;

    let response = app
        .oneshot(get("/api/artists?category=all&location=&priceRange=All"))
        .await
        .unwrap();
    let listed = extract_json(response.into_body()).await;
    assert_eq!(names(&listed), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_list_filters_combine_with_and() {
    let (app, _dir) = setup_app().await;
    seed_three(&app).await;

    let response = app
        .oneshot(get("/api/artists?category=DJ&location=pune&priceRange=50k"))
        .await
        .unwrap();
    let listed = extract_json(response.into_body()).await;
    assert_eq!(names(&listed), vec!["C"]);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_preserves_absent_fields() {
    let (app, _dir) = setup_app().await;

    let created = create_artist(
        &app,
        json!({ "name": "Asha", "location": "Mumbai", "category": "Singer" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/artists/{}", id),
            json!({ "location": " Bangalore " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = extract_json(response.into_body()).await;
    assert_eq!(updated["location"], "Bangalore");
    assert_eq!(updated["name"], "Asha");
    assert_eq!(updated["category"], "Singer");
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_missing_malformed_and_invalid() {
    let (app, _dir) = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/artists/00000000-0000-0000-0000-000000000000",
            json!({ "location": "Pune" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/artists/garbage",
            json!({ "location": "Pune" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Update re-validates on write
    let created = create_artist(&app, json!({ "name": "Asha" })).await;
    let id = created["id"].as_str().unwrap();
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/artists/{}", id),
            json!({ "email": "broken" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_returns_confirmation_payload() {
    let (app, _dir) = setup_app().await;

    let created = create_artist(&app, json!({ "name": "Asha" })).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/artists/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Artist deleted");
    assert_eq!(body["deletedArtist"]["id"], id);
    assert_eq!(body["deletedArtist"]["name"], "Asha");

    // Gone afterwards
    let response = app
        .oneshot(get(&format!("/api/artists/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_id_is_not_found() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/artists/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn test_upload_accepts_png_and_persists_it() {
    let (app, dir) = setup_app().await;

    let data = vec![0u8; 1024 * 1024]; // 1MB
    let response = app
        .oneshot(multipart_request(
            "/api/upload",
            "file",
            "portrait.png",
            "image/png",
            &data,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "File uploaded successfully");
    assert_eq!(body["size"], 1024 * 1024);
    assert_eq!(body["mimetype"], "image/png");

    let path = body["path"].as_str().unwrap();
    assert!(path.starts_with("/uploads/"));
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.ends_with(".png"));

    let on_disk = dir.path().join("uploads").join(filename);
    assert_eq!(std::fs::metadata(on_disk).unwrap().len(), 1024 * 1024);
}

#[tokio::test]
async fn test_upload_rejects_oversized_file_with_size_message() {
    let (app, _dir) = setup_app().await;

    let data = vec![0u8; 6 * 1024 * 1024]; // 6MB
    let response = app
        .oneshot(multipart_request(
            "/api/upload",
            "file",
            "huge.jpg",
            "image/jpeg",
            &data,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "File too large. Maximum size is 5MB");
}

#[tokio::test]
async fn test_upload_rejects_wrong_type_with_type_message() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(multipart_request(
            "/api/upload",
            "file",
            "notes.txt",
            "text/plain",
            b"hello",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["message"],
        "Only image files (JPEG, JPG, PNG, GIF, WebP) are allowed"
    );
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(multipart_request(
            "/api/upload",
            "avatar",
            "portrait.png",
            "image/png",
            b"data",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "No file uploaded");
}

#[tokio::test]
async fn test_sequential_uploads_of_same_name_get_distinct_references() {
    let (app, _dir) = setup_app().await;

    let mut paths = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(multipart_request(
                "/api/upload",
                "file",
                "portrait.png",
                "image/png",
                b"same-bytes",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        paths.push(body["path"].as_str().unwrap().to_string());
    }

    assert_ne!(paths[0], paths[1]);
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn test_rate_limit_returns_429_over_quota() {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    artistly_server::db::init_schema(&pool).await.unwrap();
    let dir = TempDir::new().unwrap();
    let storage = Arc::new(ImageStore::LocalDisk {
        dir: dir.path().join("uploads"),
    });

    let state = AppState::new(pool, storage).with_rate_limit(2);
    let app = build_router(state);

    for _ in 0..2 {
        let response = app.clone().oneshot(get("/api/artists")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(get("/api/artists")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = extract_json(response.into_body()).await;
    assert!(body["message"].as_str().unwrap().contains("Too many requests"));

    // UI pages are not rate limited
    let response = app.oneshot(get("/artists")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unmatched_route_gets_json_404() {
    let (app, _dir) = setup_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/no-such-route"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Route not found");

    let response = app.oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "Route not found");
}

// =============================================================================
// UI pages
// =============================================================================

#[tokio::test]
async fn test_ui_pages_and_assets_are_served() {
    let (app, _dir) = setup_app().await;

    for uri in ["/artists", "/onboarding", "/dashboard"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "page {uri}");
    }

    for uri in [
        "/static/artistly.css",
        "/static/app.js",
        "/static/browse.js",
        "/static/onboarding.js",
        "/static/dashboard.js",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "asset {uri}");
    }
}
