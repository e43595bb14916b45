//! Error types for ridgeprint-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
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

/// Result type for filtering operations
pub type FilterResult<T> = Result<T, FilterError>;
