//! ridgeprint-color - Binarization
//!
//! Turns an intensity matrix into a two-level matrix with a single fixed
//! threshold: ink (0) below it, background (1) at or above it.

pub mod error;
pub mod threshold;

// Re-export core types
pub use ridgeprint_core;

pub use error::{ColorError, ColorResult};
pub use threshold::{DEFAULT_THRESHOLD, ThresholdOptions, binarize, threshold_to_binary};
