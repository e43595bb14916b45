//! ridgeprint-morph - Binary morphology for fingerprint ridges
//!
//! This crate cleans and thins binary ridge maps:
//!
//! - **Despeckling** ([`despeckle`]): two fixed 3x3 boolean filters that
//!   close one-pixel gaps and remove isolated specks
//! - **Thinning** ([`thin`]): Zhang-Suen skeletonization to one-pixel-wide
//!   ridges
//!
//! Binary matrices use 0 for ink (ridge) and 1 for background.

pub mod despeckle;
pub mod error;
pub mod thin;

// Re-export core types
pub use ridgeprint_core;

pub use despeckle::{BorderHandling, despeckle, fill_gaps, remove_specks};
pub use error::{MorphError, MorphResult};
pub use thin::{
    SubIteration, is_thinning_candidate, neighbor_count, skeletonize, thin_zhang_suen,
    transitions,
};
