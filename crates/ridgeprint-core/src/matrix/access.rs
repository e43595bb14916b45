//! Pixel access functions
//!
//! Low-level getters and setters for individual pixels. Checked variants
//! return `None` / `Err` outside the matrix; the unchecked variants are
//! for inner loops that already iterate inside the bounds.

use super::{PixelDepth, PixelMatrix, PixelMatrixMut};
use crate::color;
use crate::error::{Error, Result};

impl PixelMatrix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Get a pixel value without the `Option` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < self.inner.width && y < self.inner.height);
        self.inner.data[self.inner.index(x, y)]
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit matrices.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.inner.depth != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixelMatrixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Get a pixel value without the `Option` wrapper.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < self.inner.width && y < self.inner.height);
        self.inner.data[self.inner.index(x, y)]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::InvalidPixelValue`] if `val` is outside the depth's domain.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        if !self.inner.depth.contains(val) {
            return Err(Error::InvalidPixelValue {
                x,
                y,
                value: val,
                depth: self.inner.depth,
            });
        }
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = val;
        Ok(())
    }

    /// Set a pixel value, skipping the bounds and domain checks.
    ///
    /// Callers guarantee `val` is in the depth's domain.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        debug_assert!(self.inner.depth.contains(val));
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = val;
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 32-bit matrices.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.inner.depth != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth {
                expected: PixelDepth::Bit32.name(),
                actual: self.inner.depth.bits(),
            });
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_out_of_bounds() {
        let m = PixelMatrix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert_eq!(m.get_pixel(2, 2), Some(0));
        assert_eq!(m.get_pixel(3, 0), None);
        assert_eq!(m.get_pixel(0, 3), None);
    }

    #[test]
    fn test_set_rejects_out_of_domain() {
        let mut m = PixelMatrixMut::new(2, 2, PixelDepth::Bit1).unwrap();
        assert!(m.set_pixel(1, 1, 1).is_ok());
        assert!(matches!(
            m.set_pixel(1, 1, 2),
            Err(Error::InvalidPixelValue { value: 2, .. })
        ));
        assert!(matches!(
            m.set_pixel(2, 0, 1),
            Err(Error::IndexOutOfBounds { x: 2, y: 0, .. })
        ));
        assert_eq!(m.get_pixel(1, 1), Some(1));
    }

    #[test]
    fn test_rgb_access() {
        let mut m = PixelMatrixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        m.set_rgb(1, 0, 10, 20, 30).unwrap();
        let m: PixelMatrix = m.into();
        assert_eq!(m.get_rgb(1, 0), Some((10, 20, 30)));
        assert_eq!(m.get_rgb(0, 0), Some((0, 0, 0)));

        let gray = PixelMatrix::new(1, 1, PixelDepth::Bit8).unwrap();
        assert_eq!(gray.get_rgb(0, 0), None);
    }

    #[test]
    fn test_set_rgb_requires_32bpp() {
        let mut m = PixelMatrixMut::new(1, 1, PixelDepth::Bit8).unwrap();
        assert!(m.set_rgb(0, 0, 1, 2, 3).is_err());
    }
}
