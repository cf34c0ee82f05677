//! Error types for folio_animation

use thiserror::Error;

/// Errors produced while configuring or evaluating animations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// A trigger anchor string could not be parsed (e.g. `"top 80%"`)
    #[error("invalid trigger anchor: {0:?}")]
    InvalidAnchor(String),

    /// An easing name is not known
    #[error("unknown easing: {0:?}")]
    UnknownEasing(String),

    /// The trigger's target element is no longer mounted
    #[error("trigger target {0} is not mounted")]
    Unmounted(u64),

    /// The viewport has no height, so no scroll fraction exists
    #[error("viewport has zero height")]
    EmptyViewport,

    /// The resolved scroll range is unusable
    #[error("invalid trigger range: start={start}, end={end}")]
    InvalidRange { start: f32, end: f32 },
}

/// Result type for folio_animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
