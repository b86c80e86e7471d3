//! Error types for clip range computation.

use std::fmt;

/// Result type for clip range operations.
pub type ClipResult<T> = Result<T, ClipError>;

/// Errors raised when a clip range cannot be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipError {
    /// The view distance was zero, negative, NaN or infinite.
    InvalidViewDistance(f32),

    /// A settings value is outside its allowed range.
    InvalidSettings(String),

    /// A near/far pair that breaks `0 < near < far`.
    InvalidRange { near: f32, far: f32 },
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::InvalidViewDistance(d) => {
                write!(f, "Invalid view distance: {} (must be finite and > 0)", d)
            }
            ClipError::InvalidSettings(msg) => write!(f, "Invalid clip settings: {}", msg),
            ClipError::InvalidRange { near, far } => {
                write!(f, "Invalid clip range: near {} / far {}", near, far)
            }
        }
    }
}

impl std::error::Error for ClipError {}
