//! Error types for ridgeprint-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
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

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;

/// Check that `pix` is a non-empty binary matrix.
pub(crate) fn check_binary(pix: &ridgeprint_core::PixelMatrix) -> MorphResult<()> {
    if pix.is_empty() {
        return Err(MorphError::EmptyImage);
    }
    if pix.depth() != ridgeprint_core::PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
