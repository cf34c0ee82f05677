//! Error types for folio_app

use thiserror::Error;

/// Errors raised while loading, mounting or running the portfolio
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration is well-formed TOML but has unusable values
    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] folio_core::CoreError),

    #[error(transparent)]
    Animation(#[from] folio_animation::AnimationError),

    /// The relay request could not be sent or its response not read
    #[error("relay request failed: {0}")]
    Relay(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("relay rejected the message ({status}): {body}")]
    RelayStatus { status: u16, body: String },

    /// The relay task ended without reporting a result
    #[error("relay task ended without a result")]
    RelayAborted,

    /// A required relay credential is empty
    #[error("missing relay credential: {0}")]
    MissingCredential(&'static str),

    /// A form field failed validation
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// A submission is already in flight
    #[error("a message is already being sent")]
    Busy,

    /// Submitting requires a running tokio runtime
    #[error("no async runtime available for the relay")]
    NoRuntime,

    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, AppError>;
