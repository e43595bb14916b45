//! PixelMatrix - the image container handed from stage to stage
//!
//! A `PixelMatrix` is a rectangular grid of unsigned values with a fixed
//! width, height and depth. The depth fixes the value domain:
//!
//! - [`PixelDepth::Bit1`]: binary, values in {0, 1} (0 = ink, 1 = background)
//! - [`PixelDepth::Bit8`]: intensity, values in 0..=255
//! - [`PixelDepth::Bit32`]: RGB, packed `0xRRGGBBAA` (see [`crate::color`])
//!
//! # Pixel layout
//!
//! One `u32` per pixel, row-major, addressed `(x, y)` = (column, row).
//!
//! # Ownership model
//!
//! `PixelMatrix` owns its buffer and never exposes it mutably. Stages read
//! their input through `&PixelMatrix` and build a fresh output through
//! [`PixelMatrixMut`], which converts back with `Into<PixelMatrix>`.
//! Cloning copies the buffer; no two matrices alias the same pixels.

mod access;
pub mod convert;
mod histogram;

pub use histogram::GRAY_LEVELS;

use crate::error::{Error, Result};

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// Binary matrix: 0 = ink, 1 = background
    Bit1 = 1,
    /// Intensity matrix, 0..=255
    Bit8 = 8,
    /// Packed RGB matrix
    Bit32 = 32,
}

impl PixelDepth {
    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }

    /// Check whether `value` belongs to the domain of this depth.
    #[inline]
    pub fn contains(self, value: u32) -> bool {
        value <= self.max_value()
    }

    /// Short human-readable name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            PixelDepth::Bit1 => "1 bpp binary",
            PixelDepth::Bit8 => "8 bpp intensity",
            PixelDepth::Bit32 => "32 bpp RGB",
        }
    }
}

/// Image file container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" | "jfif" => Self::Jpeg,
            _ => Self::Unknown,
        }
    }
}

/// Internal matrix data
#[derive(Debug, Clone, PartialEq, Eq)]
struct MatrixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    data: Vec<u32>,
}

impl MatrixData {
    fn zeroed(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let len = checked_area(width, height)?;
        Ok(MatrixData {
            width,
            height,
            depth,
            data: vec![0u32; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn checked_area(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::InvalidParameter(format!("{width}x{height} matrix is too large")))
}

/// Immutable pixel matrix
///
/// # Examples
///
/// ```
/// use ridgeprint_core::{PixelDepth, PixelMatrix};
///
/// let m = PixelMatrix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!(m.width(), 640);
/// assert_eq!(m.height(), 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    inner: MatrixData,
}

impl PixelMatrix {
    /// Create a zero-filled matrix.
    ///
    /// A zero width or height is accepted here; stages reject such
    /// matrices with [`Error::InvalidDimension`] when they are used.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixelMatrix {
            inner: MatrixData::zeroed(width, height, depth)?,
        })
    }

    /// Create a matrix from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLength`] if `data.len() != width * height` and
    /// [`Error::InvalidPixelValue`] for the first value outside the depth's
    /// domain.
    pub fn from_data(width: u32, height: u32, depth: PixelDepth, data: Vec<u32>) -> Result<Self> {
        let expected = checked_area(width, height)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        if let Some(i) = data.iter().position(|&v| !depth.contains(v)) {
            let w = width as usize;
            return Err(Error::InvalidPixelValue {
                x: (i % w) as u32,
                y: (i / w) as u32,
                value: data[i],
                depth,
            });
        }
        Ok(PixelMatrix {
            inner: MatrixData {
                width,
                height,
                depth,
                data,
            },
        })
    }

    /// Create a matrix by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, depth: PixelDepth, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> u32,
    {
        let mut out = PixelMatrixMut::new(width, height, depth)?;
        for y in 0..height {
            for x in 0..width {
                out.set_pixel(x, y, f(x, y))?;
            }
        }
        Ok(out.into())
    }

    /// Get the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get raw access to the row-major buffer.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// True when the matrix has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Check if two matrices have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &PixelMatrix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Count the pixels holding exactly `value`.
    pub fn count_value(&self, value: u32) -> usize {
        self.inner.data.iter().filter(|&&v| v == value).count()
    }

    /// Fail with [`Error::InvalidDimension`] if the matrix has zero area.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidDimension {
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        Ok(())
    }

    /// Fail with [`Error::UnsupportedDepth`] unless the depth is `expected`.
    pub fn ensure_depth(&self, expected: PixelDepth) -> Result<()> {
        if self.inner.depth != expected {
            return Err(Error::UnsupportedDepth {
                expected: expected.name(),
                actual: self.inner.depth.bits(),
            });
        }
        Ok(())
    }

    /// Create a zero-filled writable matrix with the same size and depth.
    pub fn create_template(&self) -> PixelMatrixMut {
        self.create_template_with_depth(self.inner.depth)
    }

    /// Create a zero-filled writable matrix with the same size and a new depth.
    pub fn create_template_with_depth(&self, depth: PixelDepth) -> PixelMatrixMut {
        PixelMatrixMut {
            inner: MatrixData {
                width: self.inner.width,
                height: self.inner.height,
                depth,
                data: vec![0u32; self.inner.data.len()],
            },
        }
    }

    /// Create a writable copy of this matrix.
    pub fn to_mut(&self) -> PixelMatrixMut {
        PixelMatrixMut {
            inner: self.inner.clone(),
        }
    }
}

/// Writable pixel matrix
///
/// Build a stage output here, then convert with `Into<PixelMatrix>`.
#[derive(Debug)]
pub struct PixelMatrixMut {
    inner: MatrixData,
}

impl PixelMatrixMut {
    /// Create a zero-filled writable matrix.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixelMatrixMut {
            inner: MatrixData::zeroed(width, height, depth)?,
        })
    }

    /// Get the width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get raw access to the row-major buffer.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }
}

impl From<PixelMatrixMut> for PixelMatrix {
    fn from(m: PixelMatrixMut) -> Self {
        PixelMatrix { inner: m.inner }
    }
}
