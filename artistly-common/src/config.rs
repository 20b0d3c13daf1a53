//! Configuration loading and data directory resolution
//!
//! Resolution priority, highest first:
//! 1. Command-line argument / environment variable (handled by clap in the
//!    server binary and passed in as overrides)
//! 2. TOML config file (`--config`, else the platform config directory)
//! 3. Compiled defaults

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Default listen port for the backend.
pub const DEFAULT_PORT: u16 = 3001;

/// Default API rate limit (requests per minute across all clients).
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Storage backend for uploaded images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// Files written under the uploads directory, served at `/uploads`
    Local,
    /// Files pushed to a remote blob store over HTTP
    Remote,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(StorageKind::Local),
            "remote" => Ok(StorageKind::Remote),
            other => Err(Error::Config(format!(
                "Unknown storage backend '{}' (expected 'local' or 'remote')",
                other
            ))),
        }
    }
}

/// Resolved runtime configuration for the backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port
    pub port: u16,
    /// Directory holding the database and local uploads
    pub data_dir: PathBuf,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Upload storage backend
    pub storage: StorageKind,
    /// Remote blob store endpoint (required for the remote backend)
    pub blob_endpoint: Option<String>,
    /// Public base URL for remote blobs; defaults to the endpoint
    pub blob_public_base: Option<String>,
    /// API rate limit in requests per minute; 0 disables limiting
    pub rate_limit_per_minute: u32,
}

/// Optional values collected from CLI flags / environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub cors_origins: Option<Vec<String>>,
    pub storage: Option<StorageKind>,
    pub blob_endpoint: Option<String>,
    pub blob_public_base: Option<String>,
    pub rate_limit_per_minute: Option<u32>,
    pub config_file: Option<PathBuf>,
}

/// On-disk TOML representation. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub cors_origins: Option<Vec<String>>,
    pub storage: Option<StorageKind>,
    pub blob_endpoint: Option<String>,
    pub blob_public_base: Option<String>,
    pub rate_limit_per_minute: Option<u32>,
}

impl Config {
    /// Resolve the effective configuration from overrides, the TOML file
    /// and compiled defaults.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Config> {
        let toml_config = load_toml_config(overrides.config_file.as_deref())?;

        let config = Config {
            port: overrides
                .port
                .or(toml_config.port)
                .unwrap_or(DEFAULT_PORT),
            data_dir: overrides
                .data_dir
                .or(toml_config.data_dir)
                .unwrap_or_else(default_data_dir),
            cors_origins: overrides
                .cors_origins
                .or(toml_config.cors_origins)
                .unwrap_or_else(default_cors_origins),
            storage: overrides
                .storage
                .or(toml_config.storage)
                .unwrap_or(StorageKind::Local),
            blob_endpoint: overrides.blob_endpoint.or(toml_config.blob_endpoint),
            blob_public_base: overrides
                .blob_public_base
                .or(toml_config.blob_public_base),
            rate_limit_per_minute: overrides
                .rate_limit_per_minute
                .or(toml_config.rate_limit_per_minute)
                .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE),
        };

        if config.storage == StorageKind::Remote && config.blob_endpoint.is_none() {
            return Err(Error::Config(
                "Remote storage selected but no blob endpoint configured".to_string(),
            ));
        }

        Ok(config)
    }

    /// Path of the SQLite database file inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("artistly.db")
    }

    /// Directory for locally stored uploads.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Create the data and uploads directories if missing.
    pub fn ensure_data_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }
}

/// Load the TOML config file. An explicitly given path must exist and
/// parse; the default path is optional and silently skipped when absent.
fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let (path, required) = match explicit {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(TomlConfig::default()),
        },
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Default config file path: `<config dir>/artistly/config.toml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("artistly").join("config.toml"))
}

/// OS-dependent default data directory.
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("artistly"))
        .unwrap_or_else(|| {
            warn!("Could not determine platform data directory, using ./artistly_data");
            PathBuf::from("./artistly_data")
        })
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}
