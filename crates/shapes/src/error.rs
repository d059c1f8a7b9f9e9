//! Error types for the shape catalog

use thiserror::Error;

/// Errors that can occur constructing or reconstructing shapes
#[derive(Error, Debug)]
pub enum ShapeError {
    /// A required parameter is absent from a parameter map
    #[error("Shape '{kind}' is missing parameter '{param}'")]
    MissingParam { kind: String, param: String },

    /// A parameter is present but has the wrong type or an invalid value
    #[error("Shape '{kind}' has invalid parameter '{param}': {reason}")]
    InvalidParam {
        kind: String,
        param: String,
        reason: String,
    },

    /// A kind name has no descriptor in the requested namespace
    #[error("Unknown shape kind '{kind}' in namespace '{namespace}'")]
    UnknownKind { namespace: String, kind: String },

    /// A color value could not be resolved to RGB
    #[error("Unresolvable color value: {0}")]
    InvalidColor(String),
}

/// Result type for shape operations
pub type ShapeResult<T> = Result<T, ShapeError>;
