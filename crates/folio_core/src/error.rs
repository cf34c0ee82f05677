//! Error types for folio_core

use thiserror::Error;

/// Errors raised by core services (stores, persistence)
#[derive(Error, Debug)]
pub enum CoreError {
    /// Reading or writing a backing file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted document could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store rejected the operation
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for folio_core operations
pub type Result<T> = std::result::Result<T, CoreError>;
