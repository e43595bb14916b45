//! Binary despeckling
//!
//! Two 3x3 boolean filters are applied in a fixed order. With the
//! neighborhood labelled
//!
//! ```text
//!   a b c
//!   d p e
//!   f g h
//! ```
//!
//! the gap filter computes `p | (b & g & (d | e)) | (d & e & (b | g))` and
//! the speck filter computes
//! `p & (((a | b | d) & (e | g | h)) | ((b | c | e) & (d | f | g)))`.
//! Both read the input only, so scan order does not matter.

use crate::MorphResult;
use crate::error::check_binary;
use ridgeprint_core::{PixelDepth, PixelMatrix};

/// How pixels on the outermost ring are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderHandling {
    /// The outer ring is not evaluated and is set to 0, leaving a dark frame
    #[default]
    Clear,

    /// Every pixel is evaluated; neighbors outside the matrix read the
    /// nearest edge pixel
    Replicate,
}

/// 3x3 window in row-major order: `[a, b, c, d, p, e, f, g, h]`
type Window = [u32; 9];

fn gap_rule(w: &Window) -> u32 {
    let [_, b, _, d, p, e, _, g, _] = *w;
    p | (b & g & (d | e)) | (d & e & (b | g))
}

fn speck_rule(w: &Window) -> u32 {
    let [a, b, c, d, p, e, f, g, h] = *w;
    p & (((a | b | d) & (e | g | h)) | ((b | c | e) & (d | f | g)))
}

fn window_at(pix: &PixelMatrix, x: u32, y: u32) -> Window {
    let mut w = [0u32; 9];
    let max_x = pix.width() - 1;
    let max_y = pix.height() - 1;
    let mut i = 0;
    for dy in [-1i64, 0, 1] {
        let ny = (i64::from(y) + dy).clamp(0, i64::from(max_y)) as u32;
        for dx in [-1i64, 0, 1] {
            let nx = (i64::from(x) + dx).clamp(0, i64::from(max_x)) as u32;
            w[i] = pix.get_pixel_unchecked(nx, ny);
            i += 1;
        }
    }
    w
}

fn apply_rule(
    pix: &PixelMatrix,
    border: BorderHandling,
    rule: fn(&Window) -> u32,
) -> MorphResult<PixelMatrix> {
    check_binary(pix)?;

    let w = pix.width();
    let h = pix.height();
    let mut out = pix.create_template_with_depth(PixelDepth::Bit1);

    match border {
        BorderHandling::Clear => {
            // Template is zero-filled, so the ring stays 0
            for y in 1..h.saturating_sub(1) {
                for x in 1..w.saturating_sub(1) {
                    out.set_pixel_unchecked(x, y, rule(&window_at(pix, x, y)));
                }
            }
        }
        BorderHandling::Replicate => {
            for y in 0..h {
                for x in 0..w {
                    out.set_pixel_unchecked(x, y, rule(&window_at(pix, x, y)));
                }
            }
        }
    }

    Ok(out.into())
}

/// Close one-pixel gaps between background runs (gap filter).
pub fn fill_gaps(pix: &PixelMatrix, border: BorderHandling) -> MorphResult<PixelMatrix> {
    apply_rule(pix, border, gap_rule)
}

/// Remove unsupported background specks and protrusions (speck filter).
pub fn remove_specks(pix: &PixelMatrix, border: BorderHandling) -> MorphResult<PixelMatrix> {
    apply_rule(pix, border, speck_rule)
}

/// Despeckle a binary matrix: [`fill_gaps`] then [`remove_specks`].
///
/// The input is not modified.
///
/// # Errors
///
/// Returns [`MorphError::EmptyImage`](crate::MorphError::EmptyImage) for a
/// zero-area matrix and
/// [`MorphError::UnsupportedDepth`](crate::MorphError::UnsupportedDepth)
/// unless the input is 1 bpp.
pub fn despeckle(pix: &PixelMatrix, border: BorderHandling) -> MorphResult<PixelMatrix> {
    let filled = fill_gaps(pix, border)?;
    remove_specks(&filled, border)
}
