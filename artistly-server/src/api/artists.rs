//! Artist CRUD endpoints
//!
//! List is side-effect-free; create is not idempotent (no dedup key);
//! delete of a missing id reports NotFound rather than succeeding
//! silently.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;

use artistly_common::model::{
    validate_fields, Artist, ArtistFilter, ArtistPatch, DeleteResponse, NewArtist,
    PLACEHOLDER_IMAGE,
};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/artists
///
/// Optional `category`, `location`, `priceRange` query filters; each
/// non-empty, non-"all" value matches case-insensitively as a substring.
/// Always returns an array, possibly empty.
pub async fn list_artists(
    State(state): State<AppState>,
    Query(filter): Query<ArtistFilter>,
) -> ApiResult<Json<Vec<Artist>>> {
    let artists = db::artists::list(&state.db, &filter).await?;
    Ok(Json(artists))
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Artist>> {
    let id = parse_id(&id)?;
    let artist = db::artists::get(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Artist not found".to_string()))?;
    Ok(Json(artist))
}

/// POST /api/artists
///
/// Requires a non-empty trimmed name; every other field is optional and
/// defaults to empty (placeholder for the image).
pub async fn create_artist(
    State(state): State<AppState>,
    Json(input): Json<NewArtist>,
) -> ApiResult<(StatusCode, Json<Artist>)> {
    let input = input.normalized();
    if input.name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let now = Utc::now().to_rfc3339();
    let artist = Artist {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        email: input.email,
        category: input.category,
        categories: input.categories,
        price_range: input.price_range,
        location: input.location,
        image: if input.image.is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            input.image
        },
        bio: input.bio,
        languages: input.languages,
        phone: input.phone,
        experience: input.experience,
        created_at: now.clone(),
        updated_at: now,
    };

    let errors = validate_fields(&artist);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    db::artists::insert(&state.db, &artist).await?;
    tracing::info!("Created artist {} ({})", artist.name, artist.id);

    Ok((StatusCode::CREATED, Json(artist)))
}

/// PUT /api/artists/:id
///
/// Partial update: absent fields keep their stored values. Re-validates
/// the merged record before writing (last-write-wins).
pub async fn update_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ArtistPatch>,
) -> ApiResult<Json<Artist>> {
    let id = parse_id(&id)?;
    let mut artist = db::artists::get(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Artist not found".to_string()))?;

    patch.apply_to(&mut artist);
    if artist.name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let errors = validate_fields(&artist);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    artist.updated_at = Utc::now().to_rfc3339();
    db::artists::update(&state.db, &artist).await?;

    Ok(Json(artist))
}

/// DELETE /api/artists/:id
///
/// Returns a confirmation payload carrying the deleted record.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    let deleted = db::artists::delete(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Artist not found".to_string()))?;

    tracing::info!("Deleted artist {} ({})", deleted.name, deleted.id);

    Ok(Json(DeleteResponse {
        message: "Artist deleted".to_string(),
        deleted_artist: deleted,
    }))
}

/// An identifier that is not a valid store key is a BadRequest, distinct
/// from NotFound.
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid artist id: {}", raw)))
}

/// Build artist CRUD routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artists", get(list_artists).post(create_artist))
        .route(
            "/api/artists/:id",
            get(get_artist).put(update_artist).delete(delete_artist),
        )
}
