//! Error types for spotaudit

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotauditError {
    // Catalog errors
    #[error("Catalog directory not found at {path}")]
    CatalogNotFound { path: PathBuf },

    // Lookup errors (online path). Transient failures may be retried
    // by the adapter; rejected requests are permanent.
    #[error("Geo lookup failed: {reason}")]
    Lookup { reason: String },

    #[error("Geo lookup rejected the request (HTTP {status}): {reason}")]
    LookupRejected { status: u16, reason: String },

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

pub type Result<T> = std::result::Result<T, SpotauditError>;
