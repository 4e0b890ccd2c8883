//! Grayscale raster decoding.
//!
//! Elevation rasters arrive either as an image container (PNG, TIFF) or
//! as a headerless stream of big-endian samples. Both decode into a
//! 16-bit [`ElevationGrid`]; 8-bit sources are stretched onto the full
//! 16-bit range.

use std::io::Cursor;

use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageFormat, ImageReader};

use tessera_core::constants::EIGHT_BIT_TO_SIXTEEN_BIT;
use tessera_core::{ElevationGrid, GridError, SampleDepth};

/// Errors from raster decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unsupported sample bit depth: {0} (expected 8 or 16)")]
    UnsupportedBitDepth(u8),
    #[error("corrupt raster container: {0}")]
    CorruptContainer(String),
}

impl From<GridError> for DecodeError {
    fn from(err: GridError) -> Self {
        DecodeError::CorruptContainer(err.to_string())
    }
}

/// Decode an image container into an elevation grid.
///
/// The sample depth is the one stored in the container, so packed
/// 1/2/4-bit grayscale is rejected rather than widened. Colour images
/// are reduced to luma at their native channel depth.
pub fn decode_raster(bytes: &[u8]) -> Result<ElevationGrid, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptContainer(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| DecodeError::CorruptContainer("unrecognized raster container".into()))?;
    let decoder = reader
        .into_decoder()
        .map_err(|e| DecodeError::CorruptContainer(e.to_string()))?;

    let (width, height) = decoder.dimensions();
    let stored = decoder.original_color_type();
    // The PNG decoder expands packed depths before reporting a colour type.
    let bits = match format {
        ImageFormat::Png => png_bit_depth(bytes)?,
        _ => bits_per_channel(stored),
    };
    tracing::debug!(
        "Raster container {:?}: {}x{}, {:?}, {} bits per channel",
        format,
        width,
        height,
        stored,
        bits
    );

    let depth = SampleDepth::from_bits(bits).ok_or(DecodeError::UnsupportedBitDepth(bits))?;
    let img = DynamicImage::from_decoder(decoder)
        .map_err(|e| DecodeError::CorruptContainer(e.to_string()))?;
    grid_from_image(img, depth)
}

/// Decode a raw big-endian sample stream of known dimensions.
///
/// 16-bit samples are `(b0 << 8) | b1`; 8-bit samples are multiplied
/// by 257.
pub fn decode_samples(
    bytes: &[u8],
    width: u32,
    height: u32,
    bit_depth: u8,
) -> Result<ElevationGrid, DecodeError> {
    let depth =
        SampleDepth::from_bits(bit_depth).ok_or(DecodeError::UnsupportedBitDepth(bit_depth))?;

    let sample_count = width as usize * height as usize;
    let expected = sample_count * depth.bytes_per_sample();
    if bytes.len() != expected {
        return Err(DecodeError::CorruptContainer(format!(
            "{}x{} raster at {} bits needs {} bytes, got {}",
            width,
            height,
            depth.bits(),
            expected,
            bytes.len()
        )));
    }

    let samples = match depth {
        SampleDepth::Sixteen => bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect(),
        SampleDepth::Eight => widen_8bit(bytes),
    };

    Ok(ElevationGrid::new(width, height, samples)?)
}

/// Stretch 8-bit samples onto the 16-bit range.
pub fn widen_8bit(samples: &[u8]) -> Vec<u16> {
    samples
        .iter()
        .map(|&s| s as u16 * EIGHT_BIT_TO_SIXTEEN_BIT)
        .collect()
}

/// Bit depth recorded in the PNG header, before any expansion.
fn png_bit_depth(bytes: &[u8]) -> Result<u8, DecodeError> {
    let reader = png::Decoder::new(Cursor::new(bytes))
        .read_info()
        .map_err(|e| DecodeError::CorruptContainer(e.to_string()))?;
    Ok(reader.info().bit_depth as u8)
}

fn bits_per_channel(color: ExtendedColorType) -> u8 {
    let channels = color.channel_count().max(1) as u16;
    (color.bits_per_pixel() / channels) as u8
}

fn grid_from_image(img: DynamicImage, depth: SampleDepth) -> Result<ElevationGrid, DecodeError> {
    let (width, height) = (img.width(), img.height());
    let samples = match (depth, img) {
        (SampleDepth::Sixteen, DynamicImage::ImageLuma16(buf)) => buf.into_raw(),
        (SampleDepth::Sixteen, other) => other.to_luma16().into_raw(),
        (SampleDepth::Eight, DynamicImage::ImageLuma8(buf)) => widen_8bit(buf.as_raw()),
        (SampleDepth::Eight, other) => widen_8bit(other.to_luma8().as_raw()),
    };
    Ok(ElevationGrid::new(width, height, samples)?)
}
