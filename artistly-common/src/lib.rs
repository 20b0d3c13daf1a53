//! Shared types for the Artistly services
//!
//! Holds the artist domain model and wire types used by both the backend
//! (`artistly-server`) and the client data layer (`artistly-client`),
//! plus configuration loading and common error types.

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
