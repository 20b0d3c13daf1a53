//! Artist record persistence and filtering

use artistly_common::model::{Artist, ArtistFilter};
use sqlx::{Row, SqlitePool};
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const COLUMNS: &str = "id, name, email, category, categories, price_range, location, \
                       image, bio, languages, phone, experience, created_at, updated_at";

/// List artists matching the filter.
///
/// Each active filter value matches case-insensitively as a substring of
/// the stored field (`instr` on lowered text, so `%`/`_` carry no wildcard
/// meaning). No active filters returns every record.
pub async fn list(pool: &SqlitePool, filter: &ArtistFilter) -> Result<Vec<Artist>, sqlx::Error> {
    let mut sql = format!("SELECT {} FROM artists", COLUMNS);
    let mut clauses: Vec<&str> = Vec::new();
    let mut binds: Vec<&str> = Vec::new();

    if let Some(category) = filter.category() {
        clauses.push("instr(lower(category), lower(?)) > 0");
        binds.push(category);
    }
    if let Some(location) = filter.location() {
        clauses.push("instr(lower(location), lower(?)) > 0");
        binds.push(location);
    }
    if let Some(price_range) = filter.price_range() {
        clauses.push("instr(lower(price_range), lower(?)) > 0");
        binds.push(price_range);
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC, id");

    let mut query = sqlx::query(&sql);
    for value in binds {
        query = query.bind(value);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows.iter().map(row_to_artist).collect())
}

/// Load one artist by id.
pub async fn get(pool: &SqlitePool, id: &Uuid) -> Result<Option<Artist>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {} FROM artists WHERE id = ?", COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(row_to_artist))
}

/// Insert a new artist record.
pub async fn insert(pool: &SqlitePool, artist: &Artist) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO artists (
            id, name, email, category, categories, price_range, location,
            image, bio, languages, phone, experience, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.id)
    .bind(&artist.name)
    .bind(&artist.email)
    .bind(&artist.category)
    .bind(encode_list(&artist.categories))
    .bind(&artist.price_range)
    .bind(&artist.location)
    .bind(&artist.image)
    .bind(&artist.bio)
    .bind(encode_list(&artist.languages))
    .bind(&artist.phone)
    .bind(&artist.experience)
    .bind(&artist.created_at)
    .bind(&artist.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrite an existing record (last-write-wins; the handler merges the
/// partial payload before calling this).
pub async fn update(pool: &SqlitePool, artist: &Artist) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, email = ?, category = ?, categories = ?, price_range = ?,
            location = ?, image = ?, bio = ?, languages = ?, phone = ?,
            experience = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.email)
    .bind(&artist.category)
    .bind(encode_list(&artist.categories))
    .bind(&artist.price_range)
    .bind(&artist.location)
    .bind(&artist.image)
    .bind(&artist.bio)
    .bind(encode_list(&artist.languages))
    .bind(&artist.phone)
    .bind(&artist.experience)
    .bind(&artist.updated_at)
    .bind(&artist.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete by id, returning the removed record, or `None` when no row
/// matched.
pub async fn delete(pool: &SqlitePool, id: &Uuid) -> Result<Option<Artist>, sqlx::Error> {
    let existing = get(pool, id).await?;
    if existing.is_some() {
        sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id.to_string())
            .execute(pool)
            .await?;
    }
    Ok(existing)
}

fn row_to_artist(row: &SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        category: row.get("category"),
        categories: decode_list(row.get("categories")),
        price_range: row.get("price_range"),
        location: row.get("location"),
        image: row.get("image"),
        bio: row.get("bio"),
        languages: decode_list(row.get("languages")),
        phone: row.get("phone"),
        experience: row.get("experience"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn decode_list(raw: String) -> Vec<String> {
    serde_json::from_str(&raw).unwrap_or_default()
}
