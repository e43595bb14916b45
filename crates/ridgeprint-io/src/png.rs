//! PNG image format support

use crate::{IoError, IoResult, SampleLayout, matrix_to_samples, samples_to_matrix};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use ridgeprint_core::PixelMatrix;
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into a 32 bpp RGB matrix.
///
/// Palette, low bit depth and 16-bit inputs are normalized to 8-bit
/// samples before expansion to RGB.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelMatrix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "PNG output depth {:?} after normalization",
            info.bit_depth
        )));
    }
    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    // Rows may be padded; repack into a tight interleaved buffer.
    let row_bytes = info.width as usize * channels;
    let mut samples = Vec::with_capacity(row_bytes * info.height as usize);
    for row in buf[..info.buffer_size()]
        .chunks(info.line_size)
        .take(info.height as usize)
    {
        samples.extend_from_slice(&row[..row_bytes.min(row.len())]);
    }

    samples_to_matrix(info.width, info.height, channels, &samples)
}

/// Write a matrix as an 8-bit PNG.
///
/// Binary and intensity matrices become grayscale PNGs; RGB matrices
/// become RGB PNGs (alpha is dropped).
pub fn write_png<W: Write>(pix: &PixelMatrix, writer: W) -> IoResult<()> {
    let (layout, data) = matrix_to_samples(pix);
    let color_type = match layout {
        SampleLayout::Gray => ColorType::Grayscale,
        SampleLayout::Rgb => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
