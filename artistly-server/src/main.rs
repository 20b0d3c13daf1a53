//! Artistly backend - Main entry point
//!
//! REST API over the artist record store plus image uploads and the
//! server-rendered Browse / Onboarding / Dashboard pages.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artistly_common::config::{Config, ConfigOverrides, StorageKind};
use artistly_server::storage::ImageStore;
use artistly_server::{build_router, AppState};

/// Command-line arguments for artistly-server
#[derive(Parser, Debug)]
#[command(name = "artistly-server")]
#[command(about = "Artistly marketplace backend")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "ARTISTLY_PORT")]
    port: Option<u16>,

    /// Directory holding the database and local uploads
    #[arg(short, long, env = "ARTISTLY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, env = "ARTISTLY_CONFIG")]
    config: Option<PathBuf>,

    /// Upload storage backend: "local" or "remote"
    #[arg(long, env = "ARTISTLY_STORAGE")]
    storage: Option<String>,

    /// Remote blob store endpoint
    #[arg(long, env = "ARTISTLY_BLOB_ENDPOINT")]
    blob_endpoint: Option<String>,

    /// Public base URL for remote blobs
    #[arg(long, env = "ARTISTLY_BLOB_PUBLIC_BASE")]
    blob_public_base: Option<String>,

    /// Allowed CORS origin (repeatable)
    #[arg(long = "cors-origin", env = "ARTISTLY_CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Option<Vec<String>>,

    /// API rate limit in requests per minute (0 disables)
    #[arg(long, env = "ARTISTLY_RATE_LIMIT")]
    rate_limit: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artistly_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let storage_kind = args
        .storage
        .as_deref()
        .map(str::parse::<StorageKind>)
        .transpose()?;

    let config = Config::resolve(ConfigOverrides {
        port: args.port,
        data_dir: args.data_dir,
        cors_origins: args.cors_origins,
        storage: storage_kind,
        blob_endpoint: args.blob_endpoint,
        blob_public_base: args.blob_public_base,
        rate_limit_per_minute: args.rate_limit,
        config_file: args.config,
    })?;

    info!("Starting Artistly backend");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", config.data_dir.display());

    config
        .ensure_data_dirs()
        .context("Failed to initialize data directory")?;

    let db_path = config.database_path();
    info!("Database: {}", db_path.display());
    let db_pool = artistly_server::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    let storage = Arc::new(ImageStore::from_config(&config)?);
    match config.storage {
        StorageKind::Local => info!("Upload storage: local disk ({})", config.uploads_dir().display()),
        StorageKind::Remote => info!("Upload storage: remote blob store"),
    }

    let state = AppState::new(db_pool, storage).with_rate_limit(config.rate_limit_per_minute);

    let app = build_router(state).layer(cors_layer(&config.cors_origins));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Allow the configured origins; `*` opens the API to any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}
