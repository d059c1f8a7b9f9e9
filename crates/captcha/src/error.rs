//! Error types for challenge generation and verification

use thiserror::Error;

/// Errors that can occur in the challenge lifecycle. Generation and
/// persistence failures stay distinct so callers can tell a layout problem
/// from a broken store.
#[derive(Error, Debug)]
pub enum CaptchaError {
    /// The service or its configuration cannot produce challenges at all
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Challenge generation failed (no shape could be placed, bad catalog)
    #[error("Challenge generation failed: {0}")]
    Generation(String),

    /// A shape could not be constructed from its parameters
    #[error(transparent)]
    Shape(#[from] shapes::ShapeError),

    /// The challenge record could not be persisted or loaded
    #[error("Challenge persistence failed: {0}")]
    Persistence(#[from] store::StoreError),
}

/// Result type for challenge operations
pub type CaptchaResult<T> = Result<T, CaptchaError>;
