//! JPEG image format support
//!
//! Reads with `jpeg-decoder` (8-bit grayscale and RGB) and writes with
//! `jpeg-encoder`. JPEG is lossy: a written binary skeleton will not read
//! back bit-exact, so regression checks use PNG.

use crate::{IoError, IoResult, SampleLayout, matrix_to_samples, samples_to_matrix};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use ridgeprint_core::PixelMatrix;
use std::io::{Read, Write};

/// Quality used for every JPEG written by this crate.
pub const JPEG_QUALITY: u8 = 90;

/// Read a JPEG image into a 32 bpp RGB matrix.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelMatrix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let channels = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::RGB24 => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    samples_to_matrix(
        u32::from(info.width),
        u32::from(info.height),
        channels,
        &data,
    )
}

/// Write a matrix as a baseline JPEG.
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if either dimension exceeds 65535.
pub fn write_jpeg<W: Write>(pix: &PixelMatrix, writer: W) -> IoResult<()> {
    let width = u16::try_from(pix.width())
        .map_err(|_| IoError::EncodeError(format!("JPEG width {} too large", pix.width())))?;
    let height = u16::try_from(pix.height())
        .map_err(|_| IoError::EncodeError(format!("JPEG height {} too large", pix.height())))?;

    let (layout, data) = matrix_to_samples(pix);
    let color_type = match layout {
        SampleLayout::Gray => ColorType::Luma,
        SampleLayout::Rgb => ColorType::Rgb,
    };

    Encoder::new(writer, JPEG_QUALITY)
        .encode(&data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
