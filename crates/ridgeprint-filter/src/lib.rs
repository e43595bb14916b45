//! ridgeprint-filter - Contrast enhancement
//!
//! Histogram equalization of intensity matrices through a 256-entry
//! lookup table built from the cumulative histogram.

pub mod enhance;
mod error;

// Re-export core types
pub use ridgeprint_core;

pub use enhance::{LookupTable, apply_lut, equalize_histogram, equalize_lut};
pub use error::{FilterError, FilterResult};
