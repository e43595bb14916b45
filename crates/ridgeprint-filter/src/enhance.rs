//! Histogram equalization
//!
//! The lookup table maps level `i` to
//! `floor(cumulative(i) * 255 / pixel_count)`, where `cumulative(i)` counts
//! the pixels at or below level `i`. The table is built fresh for every
//! call and never shared.

use crate::{FilterError, FilterResult};
use ridgeprint_core::{GRAY_LEVELS, PixelDepth, PixelMatrix};

/// A 256-entry lookup table mapping input intensities to output intensities.
pub type LookupTable = [u8; GRAY_LEVELS];

fn check_intensity_input(pix: &PixelMatrix) -> FilterResult<()> {
    if pix.is_empty() {
        return Err(FilterError::EmptyImage);
    }
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Build the histogram equalization lookup table of an intensity matrix.
///
/// The result is monotonically non-decreasing, and the entry for the
/// brightest level present is always 255.
///
/// # Errors
///
/// - [`FilterError::EmptyImage`] for a zero-area matrix
/// - [`FilterError::UnsupportedDepth`] unless the matrix is 8 bpp
pub fn equalize_lut(pix: &PixelMatrix) -> FilterResult<LookupTable> {
    check_intensity_input(pix)?;

    let hist = pix.gray_histogram()?;
    let total = pix.pixel_count() as u64;

    let mut lut = [0u8; GRAY_LEVELS];
    let mut cumulative = 0u64;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        cumulative += u64::from(count);
        // cumulative <= total, so the quotient is at most 255
        *entry = (cumulative * 255 / total) as u8;
    }

    Ok(lut)
}

/// Remap every pixel of an intensity matrix through `lut`.
pub fn apply_lut(pix: &PixelMatrix, lut: &LookupTable) -> FilterResult<PixelMatrix> {
    check_intensity_input(pix)?;

    let mut out = pix.create_template();
    for y in 0..pix.height() {
        for (x, &v) in pix.row(y).iter().enumerate() {
            out.set_pixel_unchecked(x as u32, y, u32::from(lut[v as usize]));
        }
    }
    Ok(out.into())
}

/// Equalize the histogram of an intensity matrix.
///
/// # Example
///
/// ```
/// use ridgeprint_core::{PixelDepth, PixelMatrix};
/// use ridgeprint_filter::equalize_histogram;
///
/// let flat = PixelMatrix::from_fn(5, 5, PixelDepth::Bit8, |_, _| 100).unwrap();
/// let eq = equalize_histogram(&flat).unwrap();
/// assert!(eq.data().iter().all(|&v| v == 255));
/// ```
pub fn equalize_histogram(pix: &PixelMatrix) -> FilterResult<PixelMatrix> {
    let lut = equalize_lut(pix)?;
    apply_lut(pix, &lut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_matrix_maps_to_constant() {
        let pix = PixelMatrix::from_fn(5, 5, PixelDepth::Bit8, |_, _| 100).unwrap();
        let lut = equalize_lut(&pix).unwrap();
        assert!(lut[..100].iter().all(|&v| v == 0));
        assert!(lut[100..].iter().all(|&v| v == 255));

        let eq = equalize_histogram(&pix).unwrap();
        assert!(eq.data().iter().all(|&v| v == eq.data()[0]));
        assert_eq!(eq.get_pixel(0, 0), Some(255));
    }

    #[test]
    fn test_lut_two_levels() {
        // 3 pixels at 10, 1 pixel at 200: cumulative 3/4 and 4/4
        let pix = PixelMatrix::from_data(2, 2, PixelDepth::Bit8, vec![10, 10, 10, 200]).unwrap();
        let lut = equalize_lut(&pix).unwrap();
        assert_eq!(lut[9], 0);
        assert_eq!(lut[10], 191); // floor(3 * 255 / 4)
        assert_eq!(lut[199], 191);
        assert_eq!(lut[200], 255);

        let eq = equalize_histogram(&pix).unwrap();
        assert_eq!(eq.data(), &[191, 191, 191, 255]);
    }

    #[test]
    fn test_lut_is_monotonic_and_in_range() {
        let pix =
            PixelMatrix::from_fn(37, 23, PixelDepth::Bit8, |x, y| (x * x + 7 * y) % 256).unwrap();
        let lut = equalize_lut(&pix).unwrap();
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn test_preserves_dimensions() {
        let pix = PixelMatrix::from_fn(7, 3, PixelDepth::Bit8, |x, _| x * 30).unwrap();
        let eq = equalize_histogram(&pix).unwrap();
        assert!(eq.sizes_equal(&pix));
    }

    #[test]
    fn test_input_not_modified() {
        let pix = PixelMatrix::from_fn(4, 4, PixelDepth::Bit8, |x, y| x + y).unwrap();
        let before = pix.clone();
        let _ = equalize_histogram(&pix).unwrap();
        assert_eq!(pix, before);
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        let pix = PixelMatrix::new(0, 3, PixelDepth::Bit8).unwrap();
        assert!(matches!(equalize_lut(&pix), Err(FilterError::EmptyImage)));
        assert!(matches!(
            equalize_histogram(&pix),
            Err(FilterError::EmptyImage)
        ));
    }

    #[test]
    fn test_wrong_depth_is_rejected() {
        let pix = PixelMatrix::new(3, 3, PixelDepth::Bit1).unwrap();
        assert!(matches!(
            equalize_lut(&pix),
            Err(FilterError::UnsupportedDepth { actual: 1, .. })
        ));
    }
}
