//! Error types for Geodrill

use std::path::PathBuf;
use thiserror::Error;

use crate::models::DataSource;

#[derive(Debug, Error)]
pub enum GeodrillError {
    // Fetch errors
    #[error("Request to {endpoint} endpoint failed: {reason}")]
    Fetch { endpoint: DataSource, reason: String },

    #[error("{endpoint} endpoint returned HTTP {status}")]
    HttpStatus { endpoint: DataSource, status: u16 },

    #[error("Could not decode {endpoint} response: {reason}")]
    Decode { endpoint: DataSource, reason: String },

    #[error("{endpoint} request timed out after {millis} ms")]
    Timeout { endpoint: DataSource, millis: u64 },

    // Name mapping errors
    #[error("Canonical name '{canonical}' (target of '{label}') does not map to itself")]
    MappingInvalid { label: String, canonical: String },

    #[error("Failed to load name mapping from {path}: {reason}")]
    MappingLoad { path: PathBuf, reason: String },

    #[error("Failed to read geometry source {path}: {reason}")]
    GeometryLoad { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, GeodrillError>;
