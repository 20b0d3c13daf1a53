//! Database access for the Artistly backend
//!
//! A single SQLite database in the data directory holds the artist
//! records. The store engine owns all concurrency control; handlers do
//! unconditional last-write-wins updates.

pub mod artists;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize the database connection pool, creating the file and schema
/// if missing.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the artists table if it does not exist.
///
/// `categories` and `languages` are JSON-encoded string arrays;
/// timestamps are RFC 3339 text.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            categories TEXT NOT NULL DEFAULT '[]',
            price_range TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            image TEXT NOT NULL DEFAULT '',
            bio TEXT NOT NULL DEFAULT '',
            languages TEXT NOT NULL DEFAULT '[]',
            phone TEXT NOT NULL DEFAULT '',
            experience TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database schema initialized (artists)");

    Ok(())
}
