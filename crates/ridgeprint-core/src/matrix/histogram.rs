//! Histogram generation for intensity matrices

use super::{PixelDepth, PixelMatrix};
use crate::error::Result;

/// Number of distinct intensity levels in an 8 bpp matrix.
pub const GRAY_LEVELS: usize = 256;

impl PixelMatrix {
    /// Count the occurrences of each intensity level.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty or not 8 bpp.
    ///
    /// # Example
    ///
    /// ```
    /// use ridgeprint_core::{PixelDepth, PixelMatrix};
    ///
    /// let m = PixelMatrix::from_data(2, 2, PixelDepth::Bit8, vec![7, 7, 7, 200]).unwrap();
    /// let hist = m.gray_histogram().unwrap();
    /// assert_eq!(hist[7], 3);
    /// assert_eq!(hist[200], 1);
    /// ```
    pub fn gray_histogram(&self) -> Result<[u32; GRAY_LEVELS]> {
        self.ensure_non_empty()?;
        self.ensure_depth(PixelDepth::Bit8)?;

        let mut hist = [0u32; GRAY_LEVELS];
        for &v in self.data() {
            hist[v as usize] += 1;
        }
        Ok(hist)
    }
}
