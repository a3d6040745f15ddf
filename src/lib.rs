//! # zenbmp32
//!
//! A deliberately narrow BMP codec: one canonical dialect in, one out.
//!
//! ## Supported Formats
//!
//! ### Decode
//! - 24-bit uncompressed BGR (`BI_RGB`), rows padded to 4 bytes
//! - 32-bit BGRA with a 124-byte info header carrying the canonical masks
//!   (R=`0x00FF0000`, G=`0x0000FF00`, B=`0x000000FF`, A=`0xFF000000`) and
//!   the sRGB color-space tag
//!
//! Both decode to tightly packed, top-down RGBA. 24-bit images get an
//! opaque alpha channel.
//!
//! ### Encode
//! - RGB or RGBA input, always written as 32-bit BGRA with canonical masks.
//!   Header size fields are recomputed from the payload being written.
//!
//! ## Non-Goals
//!
//! - Palette images, RLE, 1/4/8/16-bit depths
//! - Top-down (negative height) files: detected and rejected
//! - Non-canonical bitfields or color spaces: rejected, never reinterpreted
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp32::{decode_bmp, encode_bmp, Unstoppable};
//!
//! let pixels = vec![255u8, 0, 0].repeat(4); // 2x2 red, RGB
//! let file = encode_bmp(&pixels, 2, 2, 3, Unstoppable)?;
//!
//! let image = decode_bmp(&file, Unstoppable)?;
//! assert_eq!(image.channels(), 4);
//! assert_eq!(&image.pixels()[..4], &[255, 0, 0, 255]);
//!
//! // Header dump
//! println!("{}", zenbmp32::probe_bmp(&file)?);
//! # Ok::<(), zenbmp32::BmpError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod error;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod file;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::BmpHeaders;
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
#[cfg(feature = "imgref")]
pub use encode::{encode_rgb8, encode_rgba8};
pub use enough::{Stop, Unstoppable};
pub use error::{BmpError, ErrorKind};
#[cfg(feature = "std")]
pub use file::{read_bmp_file, write_bmp_file};
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

use alloc::vec::Vec;

/// Decode an in-memory BMP to top-down RGBA.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Bitmap, BmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse and validate the headers of a BMP without decoding pixels.
///
/// The returned [`BmpHeaders`] implements `Display` as a field-by-field dump.
pub fn probe_bmp(data: &[u8]) -> Result<BmpHeaders, BmpError> {
    bmp::probe(data)
}

/// Encode `width * height * channels` bytes of top-down RGB (`channels == 3`)
/// or RGBA (`channels == 4`) pixels as a 32-bit BMP.
pub fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new().encode_channels(pixels, width, height, channels, stop)
}

/// Encode with an explicit [`PixelLayout`] (`Rgb8` or `Rgba8`).
pub fn encode_bmp_layout(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    EncodeRequest::new().encode(pixels, width, height, layout, stop)
}
