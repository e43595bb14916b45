//! ridgeprint-io - Image I/O for the ridgeprint pipeline
//!
//! The pipeline never touches files itself; this crate sits on both
//! boundaries:
//!
//! - **Input**: decode a PNG or JPEG file into a 32 bpp RGB [`PixelMatrix`].
//!   Every input (gray, gray+alpha, palette, 16-bit) is normalized to 8-bit
//!   samples and expanded to RGB.
//! - **Output**: encode any matrix. Binary matrices are scaled by 255 and
//!   written as 8-bit gray, intensity matrices as 8-bit gray, RGB as RGB.
//!
//! Format support is selected with cargo features (`png-format`, `jpeg`),
//! both on by default.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_path};
pub use ridgeprint_core::ImageFormat;

use ridgeprint_core::{PixelDepth, PixelMatrix, PixelMatrixMut, color};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image file into a 32 bpp RGB matrix.
///
/// The format is detected from the file's magic number, not its name.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelMatrix> {
    let data = std::fs::read(path)?;
    read_image_from_bytes(&data)
}

/// Decode an in-memory image into a 32 bpp RGB matrix.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<PixelMatrix> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot decode {:?} images",
            other
        ))),
    }
}

/// Write a matrix to a file.
///
/// With [`ImageFormat::Unknown`] the format is taken from the path's
/// extension.
pub fn write_image<P: AsRef<Path>>(
    pix: &PixelMatrix,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => format_from_path(path),
        f => f,
    };
    if format == ImageFormat::Unknown {
        return Err(IoError::UnsupportedFormat(format!(
            "no encoder for {}",
            path.display()
        )));
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode a matrix into any writer.
pub fn write_image_to<W: Write>(pix: &PixelMatrix, writer: W, format: ImageFormat) -> IoResult<()> {
    pix.ensure_non_empty()?;
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer),
        other => {
            drop(writer);
            Err(IoError::UnsupportedFormat(format!(
                "cannot encode {:?} images",
                other
            )))
        }
    }
}

/// Sample layout of an 8-bit interleaved buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SampleLayout {
    Gray,
    Rgb,
}

/// Flatten a matrix into 8-bit samples ready for an encoder.
pub(crate) fn matrix_to_samples(pix: &PixelMatrix) -> (SampleLayout, Vec<u8>) {
    match pix.depth() {
        PixelDepth::Bit1 => (
            SampleLayout::Gray,
            pix.data().iter().map(|&v| (v * 255) as u8).collect(),
        ),
        PixelDepth::Bit8 => (
            SampleLayout::Gray,
            pix.data().iter().map(|&v| v as u8).collect(),
        ),
        PixelDepth::Bit32 => {
            let mut out = Vec::with_capacity(pix.pixel_count() * 3);
            for &p in pix.data() {
                let (r, g, b) = color::extract_rgb(p);
                out.extend_from_slice(&[r, g, b]);
            }
            (SampleLayout::Rgb, out)
        }
    }
}

/// Build a 32 bpp RGB matrix from interleaved 8-bit samples.
///
/// `channels` is 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA).
pub(crate) fn samples_to_matrix(
    width: u32,
    height: u32,
    channels: usize,
    data: &[u8],
) -> IoResult<PixelMatrix> {
    let expected = width as usize * height as usize * channels;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "decoded {} bytes, expected {}",
            data.len(),
            expected
        )));
    }

    let mut out = PixelMatrixMut::new(width, height, PixelDepth::Bit32)?;
    for (i, px) in data[..expected].chunks_exact(channels).enumerate() {
        let pixel = match *px {
            [v] => color::compose_rgb(v, v, v),
            [v, a] => color::compose_rgba(v, v, v, a),
            [r, g, b] => color::compose_rgb(r, g, b),
            [r, g, b, a] => color::compose_rgba(r, g, b, a),
            _ => {
                return Err(IoError::UnsupportedFormat(format!(
                    "{channels} samples per pixel"
                )));
            }
        };
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        out.set_pixel_unchecked(x, y, pixel);
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_samples_are_scaled() {
        let pix = PixelMatrix::from_data(3, 1, PixelDepth::Bit1, vec![0, 1, 0]).unwrap();
        let (layout, data) = matrix_to_samples(&pix);
        assert_eq!(layout, SampleLayout::Gray);
        assert_eq!(data, vec![0, 255, 0]);
    }

    #[test]
    fn test_gray_samples_expand_to_rgb() {
        let pix = samples_to_matrix(2, 1, 1, &[7, 200]).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(0, 0), Some((7, 7, 7)));
        assert_eq!(pix.get_rgb(1, 0), Some((200, 200, 200)));
    }

    #[test]
    fn test_short_sample_buffer_is_rejected() {
        assert!(matches!(
            samples_to_matrix(2, 2, 3, &[0; 5]),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_unknown_format_cannot_be_decoded() {
        assert!(matches!(
            read_image_from_bytes(b"GIF89a...."),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_matrix_cannot_be_encoded() {
        let pix = PixelMatrix::new(0, 0, PixelDepth::Bit8).unwrap();
        let mut buf = Vec::new();
        assert!(matches!(
            write_image_to(&pix, &mut buf, ImageFormat::Png),
            Err(IoError::Core(_))
        ));
    }
}
