//! Image storage backends
//!
//! One parameterized implementation replaces the local-disk / remote-blob
//! split: configuration picks the backend, handlers only see
//! [`ImageStore::store`]. Upload and artist creation remain separate
//! calls, so a failure between them leaves an orphaned stored file.

use anyhow::{Context, Result};
use artistly_common::config::{Config, StorageKind};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Timeout for remote blob uploads.
const BLOB_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A stored image and the reference to hand back to the client.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Generated collision-resistant filename
    pub filename: String,
    /// Local path (`/uploads/...`) for the disk backend
    pub path: Option<String>,
    /// Public URL for the remote blob backend
    pub url: Option<String>,
}

/// Upload storage backend, selected by configuration.
#[derive(Debug)]
pub enum ImageStore {
    /// Files under `dir`, served statically at `/uploads`
    LocalDisk { dir: PathBuf },
    /// Files pushed via HTTP PUT to `{endpoint}/{filename}`; the public
    /// URL is `{public_base}/{filename}`
    RemoteBlob {
        http: reqwest::Client,
        endpoint: String,
        public_base: String,
    },
}

impl ImageStore {
    /// Build the backend described by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.storage {
            StorageKind::Local => Ok(ImageStore::LocalDisk {
                dir: config.uploads_dir(),
            }),
            StorageKind::Remote => {
                let endpoint = config
                    .blob_endpoint
                    .clone()
                    .context("Remote storage requires a blob endpoint")?;
                let endpoint = endpoint.trim_end_matches('/').to_string();
                let public_base = config
                    .blob_public_base
                    .clone()
                    .unwrap_or_else(|| endpoint.clone())
                    .trim_end_matches('/')
                    .to_string();

                let http = reqwest::Client::builder()
                    .timeout(BLOB_UPLOAD_TIMEOUT)
                    .build()
                    .context("Failed to create blob storage HTTP client")?;

                Ok(ImageStore::RemoteBlob {
                    http,
                    endpoint,
                    public_base,
                })
            }
        }
    }

    /// Uploads directory when using disk storage (for static serving).
    pub fn local_dir(&self) -> Option<&Path> {
        match self {
            ImageStore::LocalDisk { dir } => Some(dir),
            ImageStore::RemoteBlob { .. } => None,
        }
    }

    /// Persist the file under a generated name and return its reference.
    pub async fn store(
        &self,
        original_name: &str,
        mimetype: &str,
        data: &[u8],
    ) -> Result<StoredImage> {
        let filename = unique_filename(original_name);

        match self {
            ImageStore::LocalDisk { dir } => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .context("Failed to create uploads directory")?;
                let target = dir.join(&filename);
                tokio::fs::write(&target, data)
                    .await
                    .with_context(|| format!("Failed to write {}", target.display()))?;

                info!("Stored upload {} ({} bytes)", filename, data.len());
                Ok(StoredImage {
                    path: Some(format!("/uploads/{}", filename)),
                    url: None,
                    filename,
                })
            }
            ImageStore::RemoteBlob {
                http,
                endpoint,
                public_base,
            } => {
                let upload_url = format!("{}/{}", endpoint, filename);
                let response = http
                    .put(&upload_url)
                    .header(reqwest::header::CONTENT_TYPE, mimetype)
                    .body(data.to_vec())
                    .send()
                    .await
                    .context("Blob storage request failed")?;

                if !response.status().is_success() {
                    anyhow::bail!(
                        "Blob storage rejected upload {} with status {}",
                        filename,
                        response.status()
                    );
                }

                info!("Uploaded {} to blob storage ({} bytes)", filename, data.len());
                Ok(StoredImage {
                    path: None,
                    url: Some(format!("{}/{}", public_base, filename)),
                    filename,
                })
            }
        }
    }
}

/// Generate a collision-resistant filename: millisecond timestamp prefix,
/// random suffix, original extension preserved.
fn unique_filename(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let stamp = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    let suffix = &random[..9];

    match extension {
        Some(ext) => format!("{}-{}.{}", stamp, suffix, ext),
        None => format!("{}-{}", stamp, suffix),
    }
}
