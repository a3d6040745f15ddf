//! BMP decoder for uncompressed 24-bit BGR and 32-bit BGRA bitfield images.
//!
//! Decoding runs in three pure steps: header parsing and validation,
//! staging (24-bit rows are de-padded and widened to BGRA), and a final
//! pass that reorders rows to top-down and swizzles BGRA to RGBA.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use super::BmpHeaders;
use super::header::{
    COLOR_MASK_HEADER_SIZE, ColorMaskHeader, Compression, FILE_HEADER_SIZE, FileHeader,
    INFO_HEADER_SIZE, InfoHeader, SIGNATURE, row_stride,
};
use super::validate::{check_color_mask, check_color_space};
use crate::error::BmpError;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn truncated(&self, needed: usize) -> BmpError {
        BmpError::Truncated {
            needed,
            actual: self.data.len(),
        }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(self.truncated(pos));
        }
        self.pos = pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpError> {
        let end = self.pos.checked_add(N).ok_or(self.truncated(usize::MAX))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.data.get(self.pos..end).ok_or(self.truncated(end))?);
        self.pos = end;
        Ok(buf)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BmpError> {
        let end = self.pos.checked_add(n).ok_or(self.truncated(usize::MAX))?;
        let slice = self.data.get(self.pos..end).ok_or(self.truncated(end))?;
        self.pos = end;
        Ok(slice)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse and validate all headers. Pixel data is not touched.
///
/// The `file_size` and `image_size` fields are informational and never
/// checked. The input only has to hold `offset_data + stride * height`
/// bytes; anything after that is ignored.
pub(crate) fn parse_headers(data: &[u8]) -> Result<BmpHeaders, BmpError> {
    // The signature gate runs before anything else, even on short input.
    let sig_len = data.len().min(SIGNATURE.len());
    if data[..sig_len] != SIGNATURE[..sig_len] {
        return Err(BmpError::Format(alloc::format!(
            "bad signature {:02x?}, expected \"BM\"",
            &data[..sig_len]
        )));
    }

    let mut bytes = Cursor::new(data);
    let file = FileHeader::parse(&bytes.read_fixed_bytes::<FILE_HEADER_SIZE>()?);
    let info = InfoHeader::parse(&bytes.read_fixed_bytes::<INFO_HEADER_SIZE>()?);
    if (info.header_size as usize) < INFO_HEADER_SIZE {
        return Err(BmpError::Format(alloc::format!(
            "info header size {} < {INFO_HEADER_SIZE}",
            info.header_size
        )));
    }

    tracing::trace!(
        header_size = info.header_size,
        width = info.width,
        height = info.height,
        bits_per_pixel = info.bits_per_pixel,
        compression = info.compression,
        offset_data = file.offset_data,
        "parsed BMP headers"
    );

    let color_mask = if info.bits_per_pixel == 32 {
        if !info.has_color_mask() {
            return Err(BmpError::Format(alloc::format!(
                "missing bit-mask information: header size {} < {}",
                info.header_size,
                INFO_HEADER_SIZE + COLOR_MASK_HEADER_SIZE
            )));
        }
        let mask = ColorMaskHeader::parse(&bytes.read_fixed_bytes::<COLOR_MASK_HEADER_SIZE>()?);
        check_color_mask(&mask)?;
        check_color_space(&mask)?;
        Some(mask)
    } else {
        None
    };

    if info.is_top_down() {
        return Err(BmpError::Unsupported(alloc::format!(
            "top-down BMP (height {}) is not supported",
            info.height
        )));
    }

    match info.bits_per_pixel {
        24 | 32 => {}
        bpp => {
            return Err(BmpError::Unsupported(alloc::format!(
                "BMP bit depth {bpp} unsupported (expected 24 or 32)"
            )));
        }
    }

    if info.planes != 1 {
        return Err(BmpError::Format(alloc::format!(
            "BMP planes field is {}, expected 1",
            info.planes
        )));
    }

    check_compression(&info)?;

    if info.width <= 0 || info.height == 0 {
        return Err(BmpError::Format(alloc::format!(
            "BMP has no pixels ({}x{})",
            info.width,
            info.height
        )));
    }

    let min_offset = FILE_HEADER_SIZE as u64 + u64::from(info.header_size);
    if u64::from(file.offset_data) < min_offset {
        return Err(BmpError::Format(alloc::format!(
            "pixel data offset {} overlaps headers (minimum {min_offset})",
            file.offset_data
        )));
    }

    Ok(BmpHeaders {
        file,
        info,
        color_mask,
    })
}

fn check_compression(info: &InfoHeader) -> Result<(), BmpError> {
    match (info.bits_per_pixel, info.compression()) {
        (24, Compression::Rgb) => Ok(()),
        (32, Compression::Rgb | Compression::Bitfields | Compression::AlphaBitfields) => Ok(()),
        (_, Compression::Rle4 | Compression::Rle8) => Err(BmpError::Unsupported(
            "RLE-compressed BMP is not supported".into(),
        )),
        (_, Compression::Other(n)) => Err(BmpError::Unsupported(alloc::format!(
            "unknown BMP compression {n}"
        ))),
        (bpp, c) => Err(BmpError::Format(alloc::format!(
            "compression {c:?} is invalid for {bpp}-bit BMP"
        ))),
    }
}

// ── Staging ─────────────────────────────────────────────────────────

/// Pixel rows in on-disk order and channel order, before reorientation.
pub(crate) struct StagedPixels<'a> {
    pub data: Cow<'a, [u8]>,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    /// Bytes between the starts of consecutive rows in `data`.
    pub stride: usize,
}

/// 32-bit rows are used in place: a 4-byte pixel never needs padding.
fn stage_32bit(payload: &[u8], width: usize, height: usize, stride: usize) -> StagedPixels<'_> {
    StagedPixels {
        data: Cow::Borrowed(payload),
        width,
        height,
        channels: 4,
        stride,
    }
}

/// Widen each BGR triple to BGRA with an opaque alpha and drop row padding.
fn stage_24bit(
    payload: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    stop: &dyn Stop,
) -> Result<StagedPixels<'static>, BmpError> {
    let out_stride = width * 4;
    let mut out = Vec::with_capacity(out_stride * height);
    for (row_idx, row) in payload.chunks_exact(stride).take(height).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for bgr in row[..width * 3].chunks_exact(3) {
            out.extend_from_slice(&[bgr[0], bgr[1], bgr[2], 0xFF]);
        }
    }
    Ok(StagedPixels {
        data: Cow::Owned(out),
        width,
        height,
        channels: 4,
        stride: out_stride,
    })
}

// ── Reorientation + swizzle ─────────────────────────────────────────

/// Produce a tightly packed, top-down, RGB(A)-ordered buffer.
///
/// Output row `i` comes from staged row `height - 1 - i` for bottom-up
/// input, or row `i` for top-down input.
pub(crate) fn reorient(
    staged: &StagedPixels<'_>,
    top_down: bool,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let StagedPixels {
        width,
        height,
        channels,
        stride,
        ..
    } = *staged;
    let row_bytes = width * channels;
    let mut out = vec![0u8; row_bytes * height];

    for (i, dst_row) in out.chunks_exact_mut(row_bytes.max(1)).enumerate().take(height) {
        if i % 16 == 0 {
            stop.check()?;
        }
        let src_row_idx = if top_down { i } else { height - 1 - i };
        let src_start = src_row_idx * stride;
        let src_row = &staged.data[src_start..src_start + row_bytes];

        match channels {
            1 => dst_row.copy_from_slice(src_row),
            3 => {
                for (dst, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
                    dst.copy_from_slice(&[src[2], src[1], src[0]]);
                }
            }
            4 => {
                for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                    dst.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
                }
            }
            n => {
                return Err(BmpError::Unsupported(alloc::format!(
                    "cannot reorder {n}-channel pixels"
                )));
            }
        }
    }

    Ok(out)
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode the pixel array described by `headers` to top-down RGBA.
pub(crate) fn decode_pixels(
    data: &[u8],
    headers: &BmpHeaders,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let info = &headers.info;
    let width = info.width as u32;
    let height = info.height.unsigned_abs();
    let bpp = info.bits_per_pixel;

    let stride = row_stride(bpp, width).ok_or(BmpError::DimensionsTooLarge { width, height })?;
    let payload_len = stride
        .checked_mul(height as usize)
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;

    let mut bytes = Cursor::new(data);
    bytes.set_position(headers.file.offset_data as usize)?;
    let payload = bytes.take(payload_len)?;

    let (w, h) = (width as usize, height as usize);
    let staged = match bpp {
        32 => stage_32bit(payload, w, h, stride),
        24 => stage_24bit(payload, w, h, stride, stop)?,
        other => {
            return Err(BmpError::Unsupported(alloc::format!(
                "BMP bit depth {other} unsupported (expected 24 or 32)"
            )));
        }
    };

    stop.check()?;
    reorient(&staged, info.is_top_down(), stop)
}
