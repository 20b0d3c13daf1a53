//! Common error types for Artistly

use thiserror::Error;

/// Common result type for Artistly operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared across the Artistly crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Field-level validation failures, one message per field
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
