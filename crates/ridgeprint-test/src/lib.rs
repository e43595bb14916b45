//! ridgeprint-test - Regression test framework for ridgeprint
//!
//! Supports three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use ridgeprint_test::{RegParams, synthetic_fingerprint};
//!
//! let mut rp = RegParams::new("skeleton");
//! rp.compare_values(5.0, matrix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use ridgeprint_core::{PixelDepth, PixelMatrix, color};

/// Intensity of ridge (ink) pixels in [`synthetic_fingerprint`].
pub const RIDGE_LEVEL: u8 = 20;

/// Intensity of valley (background) pixels in [`synthetic_fingerprint`].
pub const VALLEY_LEVEL: u8 = 230;

/// Build a deterministic RGB fingerprint-like image.
///
/// Concentric ridges of width `period / 2` are centered slightly off the
/// image center. Roughly one pixel in 97 is flipped between ridge and
/// valley so the despeckle stage has something to remove.
pub fn synthetic_fingerprint(width: u32, height: u32, period: u32) -> TestResult<PixelMatrix> {
    let period = period.max(2) as f64;
    let cx = width as f64 * 0.45;
    let cy = height as f64 * 0.55;
    let pix = PixelMatrix::from_fn(width, height, PixelDepth::Bit32, |x, y| {
        let dx = x as f64 - cx;
        let dy = (y as f64 - cy) * 1.3;
        let phase = (dx.hypot(dy) / period).fract();
        let mut ridge = phase < 0.5;
        if (x as u64 * 7919 + y as u64 * 104_729) % 97 == 0 {
            ridge = !ridge;
        }
        let v = if ridge { RIDGE_LEVEL } else { VALLEY_LEVEL };
        color::compose_rgb(v, v.saturating_sub(8), v.saturating_add(6))
    })?;
    Ok(pix)
}

/// Build a binary matrix from rows of `'#'` (ink, 0) and `'.'` (background, 1).
///
/// # Panics
///
/// Panics if rows differ in length; fixtures are written by hand.
pub fn binary_from_ascii(rows: &[&str]) -> PixelMatrix {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    assert!(
        rows.iter().all(|r| r.len() as u32 == width),
        "ragged fixture rows"
    );
    let data = rows
        .iter()
        .flat_map(|r| r.bytes().map(|b| if b == b'#' { 0 } else { 1 }))
        .collect();
    PixelMatrix::from_data(width, height, PixelDepth::Bit1, data).expect("valid binary fixture")
}

/// Render a binary matrix with the same `'#'` / `'.'` convention.
pub fn binary_to_ascii(pix: &PixelMatrix) -> Vec<String> {
    (0..pix.height())
        .map(|y| {
            pix.row(y)
                .iter()
                .map(|&v| if v == 0 { '#' } else { '.' })
                .collect()
        })
        .collect()
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // ridgeprint-test is at crates/ridgeprint-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
