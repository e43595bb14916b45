//! Error types for ridgeprint-color

use thiserror::Error;

/// Errors that can occur during binarization
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ridgeprint_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyImage,
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
