//! Fixed-threshold binarization

use crate::{ColorError, ColorResult};
use ridgeprint_core::{PixelDepth, PixelMatrix};

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Options for binarization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdOptions {
    /// Intensities strictly below this become ink (0)
    pub threshold: u8,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ThresholdOptions {
    /// Create options with the given threshold.
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

/// Convert an intensity matrix to binary using a fixed threshold
///
/// Pixels < threshold become ink (0), pixels >= threshold become
/// background (1). A threshold of 0 therefore yields an all-background
/// matrix.
pub fn threshold_to_binary(pix: &PixelMatrix, threshold: u8) -> ColorResult<PixelMatrix> {
    if pix.is_empty() {
        return Err(ColorError::EmptyImage);
    }
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }

    let threshold = u32::from(threshold);
    let mut out = pix.create_template_with_depth(PixelDepth::Bit1);
    for y in 0..pix.height() {
        for (x, &v) in pix.row(y).iter().enumerate() {
            out.set_pixel_unchecked(x as u32, y, u32::from(v >= threshold));
        }
    }
    Ok(out.into())
}

/// Binarize with configured options.
pub fn binarize(pix: &PixelMatrix, options: &ThresholdOptions) -> ColorResult<PixelMatrix> {
    threshold_to_binary(pix, options.threshold)
}
