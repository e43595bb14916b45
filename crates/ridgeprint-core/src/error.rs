//! Error types for ridgeprint-core
//!
//! Provides a unified error type for every operation on a pixel matrix.
//! Each variant captures enough context for diagnostics without exposing
//! internal buffer layout.

use crate::matrix::PixelDepth;
use thiserror::Error;

/// ridgeprint core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Zero-area matrix handed to an operation that needs pixels
    #[error("invalid matrix dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Matrix depth does not match what the operation consumes
    #[error("unsupported pixel depth: expected {expected}, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Value outside the domain of the matrix depth
    #[error("pixel value {value} at ({x}, {y}) is out of range for {} bpp", .depth.bits())]
    InvalidPixelValue {
        x: u32,
        y: u32,
        value: u32,
        depth: PixelDepth,
    },

    /// Coordinates outside the matrix
    #[error("pixel ({x}, {y}) is outside a {width}x{height} matrix")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Buffer length does not equal width * height
    #[error("pixel buffer holds {actual} values, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
