//! Depth conversion
//!
//! - RGB to intensity by unweighted channel mean
//! - Binary to intensity for display (`value * 255`)
//! - Binary inversion (ink <-> background)

use super::{PixelDepth, PixelMatrix};
use crate::color;
use crate::error::Result;

impl PixelMatrix {
    /// Reduce a 32 bpp RGB matrix to an 8 bpp intensity matrix.
    ///
    /// Each output value is `(r + g + b) / 3`, truncated. The alpha byte is
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidDimension`] for a zero-area matrix
    /// - [`crate::Error::UnsupportedDepth`] unless the input is 32 bpp
    pub fn convert_rgb_to_gray(&self) -> Result<PixelMatrix> {
        self.ensure_non_empty()?;
        self.ensure_depth(PixelDepth::Bit32)?;

        let mut out = self.create_template_with_depth(PixelDepth::Bit8);
        for y in 0..self.height() {
            for (x, &pixel) in self.row(y).iter().enumerate() {
                let (r, g, b) = color::extract_rgb(pixel);
                let sum = u32::from(r) + u32::from(g) + u32::from(b);
                out.set_pixel_unchecked(x as u32, y, sum / 3);
            }
        }
        Ok(out.into())
    }

    /// Rescale a binary matrix to displayable intensities (0 or 255).
    pub fn convert_binary_to_gray(&self) -> Result<PixelMatrix> {
        self.ensure_depth(PixelDepth::Bit1)?;

        let mut out = self.create_template_with_depth(PixelDepth::Bit8);
        for y in 0..self.height() {
            for (x, &v) in self.row(y).iter().enumerate() {
                out.set_pixel_unchecked(x as u32, y, v * 255);
            }
        }
        Ok(out.into())
    }

    /// Swap ink and background in a binary matrix.
    pub fn invert_binary(&self) -> Result<PixelMatrix> {
        self.ensure_depth(PixelDepth::Bit1)?;

        let mut out = self.create_template();
        for y in 0..self.height() {
            for (x, &v) in self.row(y).iter().enumerate() {
                out.set_pixel_unchecked(x as u32, y, v ^ 1);
            }
        }
        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelMatrixMut;
    use crate::error::Error;

    #[test]
    fn test_rgb_to_gray_mean_truncates() {
        let mut m = PixelMatrixMut::new(3, 1, PixelDepth::Bit32).unwrap();
        m.set_rgb(0, 0, 255, 255, 255).unwrap();
        m.set_rgb(1, 0, 10, 20, 31).unwrap(); // 61 / 3 = 20.33
        m.set_rgb(2, 0, 255, 0, 0).unwrap();
        let gray = PixelMatrix::from(m).convert_rgb_to_gray().unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.data(), &[255, 20, 85]);
    }

    #[test]
    fn test_rgb_to_gray_ignores_alpha() {
        let pixel = color::compose_rgba(30, 60, 90, 0);
        let m = PixelMatrix::from_data(1, 1, PixelDepth::Bit32, vec![pixel]).unwrap();
        assert_eq!(m.convert_rgb_to_gray().unwrap().get_pixel(0, 0), Some(60));
    }

    #[test]
    fn test_rgb_to_gray_rejects_gray_input() {
        let m = PixelMatrix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            m.convert_rgb_to_gray(),
            Err(Error::UnsupportedDepth { actual: 8, .. })
        ));
    }

    #[test]
    fn test_rgb_to_gray_rejects_empty() {
        let m = PixelMatrix::new(4, 0, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            m.convert_rgb_to_gray(),
            Err(Error::InvalidDimension { width: 4, height: 0 })
        ));
    }

    #[test]
    fn test_binary_to_gray() {
        let m = PixelMatrix::from_data(2, 1, PixelDepth::Bit1, vec![0, 1]).unwrap();
        let g = m.convert_binary_to_gray().unwrap();
        assert_eq!(g.data(), &[0, 255]);
    }

    #[test]
    fn test_invert_binary_twice_is_identity() {
        let m = PixelMatrix::from_data(2, 2, PixelDepth::Bit1, vec![0, 1, 1, 0]).unwrap();
        let inv = m.invert_binary().unwrap();
        assert_eq!(inv.data(), &[1, 0, 0, 1]);
        assert_eq!(inv.invert_binary().unwrap(), m);
    }
}
