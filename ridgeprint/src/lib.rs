//! Ridgeprint - Fingerprint image preprocessing
//!
//! Turns a color fingerprint image into a one-pixel-wide ridge skeleton
//! through five fixed stages:
//!
//! 1. grayscale reduction (RGB -> intensity)
//! 2. histogram equalization (intensity -> intensity)
//! 3. binarization (intensity -> binary, ink = 0)
//! 4. despeckling (binary -> binary)
//! 5. Zhang-Suen skeletonization (binary -> binary)
//!
//! Every stage is a pure function from one [`PixelMatrix`] to a new one.
//! [`run_pipeline`] composes them, and [`Session`] applies them one at a
//! time while enforcing their order.
//!
//! # Example
//!
//! ```
//! use ridgeprint::{PipelineOptions, PixelDepth, PixelMatrix, Stage, run_pipeline};
//!
//! let rgb = PixelMatrix::from_fn(16, 16, PixelDepth::Bit32, |x, _| {
//!     let v = if x % 4 < 2 { 20 } else { 230 };
//!     ridgeprint_core::color::compose_rgb(v, v, v)
//! })
//! .unwrap();
//!
//! let out = run_pipeline(&rgb, &PipelineOptions::default()).unwrap();
//! assert_eq!(out.final_matrix().depth(), PixelDepth::Bit1);
//! assert_eq!(out.get(Stage::Binarize).unwrap().width(), 16);
//! ```

pub mod pipeline;
mod pipeline_error;
pub mod session;

// Re-export core types (primary data structures used everywhere)
pub use ridgeprint_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use ridgeprint_color as color;
pub use ridgeprint_filter as filter;
pub use ridgeprint_io as io;
pub use ridgeprint_morph as morph;

pub use pipeline::{
    PipelineOptions, PipelineOutput, Stage, apply_stage, run_pipeline, run_through,
};
pub use pipeline_error::{PipelineError, PipelineResult, StageError};
pub use ridgeprint_morph::BorderHandling;
pub use session::Session;
