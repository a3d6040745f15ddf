//! Fixed-layout BMP header structures.
//!
//! Every field is read and written at its documented little-endian offset;
//! nothing depends on in-memory struct layout.

use alloc::vec::Vec;

/// Size of [`FileHeader`] on disk.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of [`InfoHeader`] (BITMAPINFOHEADER) on disk.
pub const INFO_HEADER_SIZE: usize = 40;
/// Size of [`ColorMaskHeader`] on disk.
pub const COLOR_MASK_HEADER_SIZE: usize = 84;
/// Offset of pixel data in files written by this crate.
pub const CANONICAL_DATA_OFFSET: usize =
    FILE_HEADER_SIZE + INFO_HEADER_SIZE + COLOR_MASK_HEADER_SIZE;

/// `"BM"`, little-endian `0x4D42`.
pub const SIGNATURE: [u8; 2] = *b"BM";

pub const RED_MASK: u32 = 0x00FF_0000;
pub const GREEN_MASK: u32 = 0x0000_FF00;
pub const BLUE_MASK: u32 = 0x0000_00FF;
pub const ALPHA_MASK: u32 = 0xFF00_0000;

/// `LCS_sRGB` color-space tag (`"sRGB"` read as a little-endian u32).
pub const LCS_SRGB: u32 = 0x7352_4742;

#[inline]
fn u16_at(b: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([b[off], b[off + 1]])
}

#[inline]
fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

#[inline]
fn i32_at(b: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
}

// ── Compression ─────────────────────────────────────────────────────

/// The `biCompression` field.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Compression {
    /// `BI_RGB`, uncompressed.
    Rgb,
    Rle8,
    Rle4,
    /// `BI_BITFIELDS`, uncompressed with channel masks.
    Bitfields,
    /// `BI_ALPHABITFIELDS`.
    AlphaBitfields,
    Other(u32),
}

impl Compression {
    pub fn from_u32(num: u32) -> Self {
        match num {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            6 => Self::AlphaBitfields,
            other => Self::Other(other),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
            Self::AlphaBitfields => 6,
            Self::Other(n) => n,
        }
    }
}

// ── File header ─────────────────────────────────────────────────────

/// `BITMAPFILEHEADER`: the 14 bytes at the start of every BMP file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: [u8; 2],
    /// Total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the pixel array.
    pub offset_data: u32,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self {
            signature: SIGNATURE,
            file_size: 0,
            reserved1: 0,
            reserved2: 0,
            offset_data: 0,
        }
    }
}

impl FileHeader {
    pub fn parse(b: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            offset_data: u32_at(b, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut a = [0u8; FILE_HEADER_SIZE];
        a[0..2].copy_from_slice(&self.signature);
        a[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        a[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        a[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        a[10..14].copy_from_slice(&self.offset_data.to_le_bytes());
        a
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    pub fn has_signature(&self) -> bool {
        self.signature == SIGNATURE
    }
}

// ── Info header ─────────────────────────────────────────────────────

/// `BITMAPINFOHEADER`: image geometry and pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    /// Byte size of this header plus any extension that follows it
    /// (84 more bytes when a [`ColorMaskHeader`] is present).
    pub header_size: u32,
    pub width: i32,
    /// Positive: bottom-up rows. Negative: top-down rows.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Pixel array size in bytes.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl Default for InfoHeader {
    fn default() -> Self {
        Self {
            header_size: INFO_HEADER_SIZE as u32,
            width: 0,
            height: 0,
            planes: 1,
            bits_per_pixel: 32,
            compression: Compression::Bitfields.to_u32(),
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }
}

impl InfoHeader {
    pub fn parse(b: &[u8; INFO_HEADER_SIZE]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: i32_at(b, 4),
            height: i32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pixels_per_meter: i32_at(b, 24),
            y_pixels_per_meter: i32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE] {
        let mut a = [0u8; INFO_HEADER_SIZE];
        a[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        a[4..8].copy_from_slice(&self.width.to_le_bytes());
        a[8..12].copy_from_slice(&self.height.to_le_bytes());
        a[12..14].copy_from_slice(&self.planes.to_le_bytes());
        a[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        a[16..20].copy_from_slice(&self.compression.to_le_bytes());
        a[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        a[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        a[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        a[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        a[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        a
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    pub fn compression(&self) -> Compression {
        Compression::from_u32(self.compression)
    }

    /// Whether `header_size` claims room for a trailing [`ColorMaskHeader`].
    pub fn has_color_mask(&self) -> bool {
        self.header_size as usize >= INFO_HEADER_SIZE + COLOR_MASK_HEADER_SIZE
    }

    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }
}

// ── Color mask header ───────────────────────────────────────────────

/// Channel bit masks and color space, following the info header of
/// 32-bit images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMaskHeader {
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space_type: u32,
    /// Endpoints, gamma and V5 fields. Unused for sRGB.
    pub unused: [u32; 16],
}

impl Default for ColorMaskHeader {
    /// Canonical BGRA masks with the sRGB tag.
    fn default() -> Self {
        Self {
            red_mask: RED_MASK,
            green_mask: GREEN_MASK,
            blue_mask: BLUE_MASK,
            alpha_mask: ALPHA_MASK,
            color_space_type: LCS_SRGB,
            unused: [0; 16],
        }
    }
}

impl ColorMaskHeader {
    pub fn parse(b: &[u8; COLOR_MASK_HEADER_SIZE]) -> Self {
        let mut unused = [0u32; 16];
        for (i, slot) in unused.iter_mut().enumerate() {
            *slot = u32_at(b, 20 + i * 4);
        }
        Self {
            red_mask: u32_at(b, 0),
            green_mask: u32_at(b, 4),
            blue_mask: u32_at(b, 8),
            alpha_mask: u32_at(b, 12),
            color_space_type: u32_at(b, 16),
            unused,
        }
    }

    pub fn to_bytes(&self) -> [u8; COLOR_MASK_HEADER_SIZE] {
        let mut a = [0u8; COLOR_MASK_HEADER_SIZE];
        a[0..4].copy_from_slice(&self.red_mask.to_le_bytes());
        a[4..8].copy_from_slice(&self.green_mask.to_le_bytes());
        a[8..12].copy_from_slice(&self.blue_mask.to_le_bytes());
        a[12..16].copy_from_slice(&self.alpha_mask.to_le_bytes());
        a[16..20].copy_from_slice(&self.color_space_type.to_le_bytes());
        for (i, v) in self.unused.iter().enumerate() {
            let off = 20 + i * 4;
            a[off..off + 4].copy_from_slice(&v.to_le_bytes());
        }
        a
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }
}

// ── Geometry ────────────────────────────────────────────────────────

/// Padded on-disk length of one pixel row: `ceil(bpp * width / 32) * 4`.
///
/// Returns `None` on overflow.
pub fn row_stride(bits_per_pixel: u16, width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(usize::from(bits_per_pixel))
        .map(|bits| bits.div_ceil(32) * 4)
}
