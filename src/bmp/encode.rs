//! BMP encoder: always 32-bit BGRA with canonical bitfields and sRGB tag.

use super::BmpHeaders;
use super::header::{
    CANONICAL_DATA_OFFSET, COLOR_MASK_HEADER_SIZE, ColorMaskHeader, Compression, FileHeader,
    INFO_HEADER_SIZE, InfoHeader,
};
use crate::error::BmpError;
use crate::pixel::PixelLayout;
use alloc::vec::Vec;
use enough::Stop;

/// Encode pixels to BMP format.
///
/// `pixels` must be exactly `width * height * channels` bytes, top-down,
/// in RGB or RGBA order.
pub(crate) fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    if width == 0 || height == 0 {
        return Err(BmpError::InvalidArgument(alloc::format!(
            "cannot encode a {width}x{height} image"
        )));
    }
    if !matches!(layout, PixelLayout::Rgb8 | PixelLayout::Rgba8) {
        return Err(BmpError::InvalidArgument(alloc::format!(
            "cannot encode {} channel(s) as BMP (supported: 3, 4)",
            layout.channels()
        )));
    }

    let w = width as usize;
    let h = height as usize;
    let expected = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if pixels.len() != expected {
        return Err(BmpError::InvalidArgument(alloc::format!(
            "pixel buffer is {} bytes, {width}x{height}x{} needs {expected}",
            pixels.len(),
            layout.channels()
        )));
    }

    let headers = canonical_headers(width, height)?;
    let payload_len = headers.info.image_size as usize;

    stop.check()?;

    let mut out = Vec::with_capacity(headers.file.file_size as usize);
    headers.file.write(&mut out);
    headers.info.write(&mut out);
    ColorMaskHeader::default().write(&mut out);
    debug_assert_eq!(out.len(), CANONICAL_DATA_OFFSET);

    let src_bpp = layout.bytes_per_pixel();
    let row_bytes = w * src_bpp;
    for row in (0..h).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let src = &pixels[row * row_bytes..(row + 1) * row_bytes];
        match layout {
            PixelLayout::Rgba8 => {
                for px in src.chunks_exact(4) {
                    out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
            }
            _ => {
                for px in src.chunks_exact(3) {
                    out.extend_from_slice(&[px[2], px[1], px[0], 0xFF]);
                }
            }
        }
    }
    debug_assert_eq!(out.len(), CANONICAL_DATA_OFFSET + payload_len);

    Ok(out)
}

/// Headers for a `width`x`height` 32-bit image, sized from the payload
/// that will actually be written.
pub(crate) fn canonical_headers(width: u32, height: u32) -> Result<BmpHeaders, BmpError> {
    let too_large = || BmpError::DimensionsTooLarge { width, height };
    let signed_w = i32::try_from(width).map_err(|_| too_large())?;
    let signed_h = i32::try_from(height).map_err(|_| too_large())?;

    // 32bpp rows are 4*width bytes: already 4-byte aligned, no padding.
    let payload_len = (width as usize)
        .checked_mul(4)
        .and_then(|row| row.checked_mul(height as usize))
        .ok_or_else(too_large)?;
    let image_size = u32::try_from(payload_len).map_err(|_| too_large())?;
    let file_size = image_size
        .checked_add(CANONICAL_DATA_OFFSET as u32)
        .ok_or_else(too_large)?;

    Ok(BmpHeaders {
        file: FileHeader {
            file_size,
            offset_data: CANONICAL_DATA_OFFSET as u32,
            ..Default::default()
        },
        info: InfoHeader {
            header_size: (INFO_HEADER_SIZE + COLOR_MASK_HEADER_SIZE) as u32,
            width: signed_w,
            height: signed_h,
            planes: 1,
            bits_per_pixel: 32,
            compression: Compression::Bitfields.to_u32(),
            image_size,
            ..Default::default()
        },
        color_mask: Some(ColorMaskHeader::default()),
    })
}
