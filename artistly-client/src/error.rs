//! Client-side error type
//!
//! Every non-2xx response is normalized into [`ClientError::Api`] with a
//! human-readable message sourced from the response body when present.

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by [`crate::ArtistlyClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connect/timeout/decode)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL is unusable
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}
