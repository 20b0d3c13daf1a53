//! Data layer for the Artistly API
//!
//! Centralizes request construction and error normalization for every
//! network call the views make. Policy, matching the in-page JS data
//! layer:
//!
//! - non-2xx responses become [`ClientError::Api`] carrying the server's
//!   `message` when the body has one, else a generic status-based message
//! - HTTP 429 gets exactly one retry after a fixed delay; every other
//!   error status propagates immediately
//! - list results are filtered of malformed records (missing id or name)
//!   before being handed to callers

pub mod error;

pub use error::{ClientError, Result};

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use artistly_common::model::{
    Artist, ArtistFilter, ArtistPatch, DeleteResponse, NewArtist, UploadResponse,
};

/// Request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed delay before the single 429 retry.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the Artistly backend.
pub struct ArtistlyClient {
    http: Client,
    base_url: String,
}

impl ArtistlyClient {
    /// Create a client for the given base URL (e.g. `http://localhost:3001`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(format!("artistly-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// GET /api/artists, dropping malformed records.
    pub async fn list_artists(&self, filter: &ArtistFilter) -> Result<Vec<Artist>> {
        let url = format!("{}/api/artists", self.base_url);
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(category) = filter.category() {
            query.push(("category", category));
        }
        if let Some(location) = filter.location() {
            query.push(("location", location));
        }
        if let Some(price_range) = filter.price_range() {
            query.push(("priceRange", price_range));
        }

        let artists: Vec<Artist> = self
            .execute(|| self.http.get(&url).query(&query))
            .await?;

        Ok(artists
            .into_iter()
            .filter(Artist::is_well_formed)
            .collect())
    }

    /// GET /api/artists/:id
    pub async fn get_artist(&self, id: &str) -> Result<Artist> {
        let url = format!("{}/api/artists/{}", self.base_url, id);
        self.execute(|| self.http.get(&url)).await
    }

    /// POST /api/artists
    pub async fn create_artist(&self, artist: &NewArtist) -> Result<Artist> {
        let url = format!("{}/api/artists", self.base_url);
        self.execute(|| self.http.post(&url).json(artist)).await
    }

    /// PUT /api/artists/:id
    pub async fn update_artist(&self, id: &str, patch: &ArtistPatch) -> Result<Artist> {
        let url = format!("{}/api/artists/{}", self.base_url, id);
        self.execute(|| self.http.put(&url).json(patch)).await
    }

    /// DELETE /api/artists/:id
    pub async fn delete_artist(&self, id: &str) -> Result<DeleteResponse> {
        let url = format!("{}/api/artists/{}", self.base_url, id);
        self.execute(|| self.http.delete(&url)).await
    }

    /// POST /api/upload
    ///
    /// The returned reference is stored on an artist by a subsequent
    /// create/update call; there is no combined operation.
    pub async fn upload_image(
        &self,
        filename: &str,
        mimetype: &str,
        data: Vec<u8>,
    ) -> Result<UploadResponse> {
        let url = format!("{}/api/upload", self.base_url);

        // Multipart forms are single-use, so the 429 retry rebuilds one.
        let build = || -> Result<RequestBuilder> {
            let part = Part::bytes(data.clone())
                .file_name(filename.to_string())
                .mime_str(mimetype)?;
            Ok(self
                .http
                .post(&url)
                .multipart(Form::new().part("file", part)))
        };

        let mut response = build()?.send().await?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            debug!("Rate limited, retrying once after {:?}", RETRY_DELAY);
            tokio::time::sleep(RETRY_DELAY).await;
            response = build()?.send().await?;
        }

        Self::handle(response).await
    }

    /// GET /api (backend status check)
    pub async fn status(&self) -> Result<serde_json::Value> {
        let url = format!("{}/api", self.base_url);
        self.execute(|| self.http.get(&url)).await
    }

    /// Send a request, retrying once after a fixed delay on HTTP 429,
    /// then normalize the response.
    async fn execute<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut response = build().send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            debug!("Rate limited, retrying once after {:?}", RETRY_DELAY);
            tokio::time::sleep(RETRY_DELAY).await;
            response = build().send().await?;
        }

        Self::handle(response).await
    }

    /// Normalize a response: non-2xx becomes [`ClientError::Api`] with the
    /// body's message when present.
    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
