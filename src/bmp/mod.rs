//! BMP codec internals: header model, validation, decoder and encoder.
//!
//! Use the top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.
//! for whole-image work; the header types are public for inspection.

mod decode;
mod encode;
pub mod header;
pub mod validate;

use core::fmt;

use crate::bitmap::Bitmap;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

use header::{COLOR_MASK_HEADER_SIZE, ColorMaskHeader, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader};

/// The parsed and validated header set of a BMP file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
    /// Present for 32-bit images only.
    pub color_mask: Option<ColorMaskHeader>,
}

impl BmpHeaders {
    pub fn width(&self) -> u32 {
        self.info.width.unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        self.info.height.unsigned_abs()
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.info.bits_per_pixel
    }

    /// Channels stored on disk (3 for BGR, 4 for BGRA).
    pub fn source_channels(&self) -> usize {
        usize::from(self.info.bits_per_pixel / 8)
    }
}

impl fmt::Display for BmpHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = &self.file;
        let info = &self.info;
        writeln!(f, "BMP file header ({FILE_HEADER_SIZE} bytes):")?;
        writeln!(
            f,
            "  file type        = {:#06x}",
            u16::from_le_bytes(file.signature)
        )?;
        writeln!(f, "  file size        = {}", file.file_size)?;
        writeln!(f, "  reserved1        = {}", file.reserved1)?;
        writeln!(f, "  reserved2        = {}", file.reserved2)?;
        writeln!(f, "  offset           = {}", file.offset_data)?;
        writeln!(f, "BMP info header ({INFO_HEADER_SIZE} bytes):")?;
        writeln!(f, "  size             = {}", info.header_size)?;
        writeln!(f, "  width            = {}", info.width)?;
        writeln!(f, "  height           = {}", info.height)?;
        writeln!(f, "  planes           = {}", info.planes)?;
        writeln!(f, "  bit count        = {}", info.bits_per_pixel)?;
        writeln!(f, "  compression      = {}", info.compression)?;
        writeln!(f, "  size image       = {}", info.image_size)?;
        writeln!(f, "  x ppm            = {}", info.x_pixels_per_meter)?;
        writeln!(f, "  y ppm            = {}", info.y_pixels_per_meter)?;
        writeln!(f, "  colors used      = {}", info.colors_used)?;
        write!(f, "  colors important = {}", info.colors_important)?;
        if let Some(mask) = &self.color_mask {
            writeln!(f)?;
            writeln!(f, "Color header ({COLOR_MASK_HEADER_SIZE} bytes):")?;
            writeln!(f, "  red mask         = {:#010x}", mask.red_mask)?;
            writeln!(f, "  green mask       = {:#010x}", mask.green_mask)?;
            writeln!(f, "  blue mask        = {:#010x}", mask.blue_mask)?;
            writeln!(f, "  alpha mask       = {:#010x}", mask.alpha_mask)?;
            write!(f, "  color space type = {:#010x}", mask.color_space_type)?;
        }
        Ok(())
    }
}

/// Parse and validate headers without decoding pixels.
pub(crate) fn probe(data: &[u8]) -> Result<BmpHeaders, BmpError> {
    decode::parse_headers(data)
}

/// Decode BMP data to top-down RGBA.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Bitmap, BmpError> {
    let headers = decode::parse_headers(data)?;
    let (width, height) = (headers.width(), headers.height());
    if let Some(limits) = limits {
        limits.check_image(width, height, PixelLayout::Rgba8.bytes_per_pixel())?;
    }
    stop.check()?;
    let pixels = decode::decode_pixels(data, &headers, stop)?;
    tracing::debug!(
        width,
        height,
        bits_per_pixel = headers.bits_per_pixel(),
        "decoded BMP"
    );
    Ok(Bitmap::from_parts(pixels, width, height, PixelLayout::Rgba8))
}

/// Encode RGB/RGBA pixels to a 32-bit BGRA BMP.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    if let Some(limits) = limits {
        limits.check_image(width, height, PixelLayout::Rgba8.bytes_per_pixel())?;
    }
    let out = encode::encode_bmp(pixels, width, height, layout, stop)?;
    tracing::debug!(width, height, ?layout, bytes = out.len(), "encoded BMP");
    Ok(out)
}
