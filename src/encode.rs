use alloc::vec::Vec;
use enough::Stop;

use crate::error::BmpError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Builder for encoding pixels to a 32-bit BMP.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode top-down `Rgb8` or `Rgba8` pixels.
    ///
    /// RGB input gains an opaque alpha channel; the output is always
    /// 32-bit BGRA with canonical masks.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode(pixels, width, height, layout, self.limits, &stop)
    }

    /// Like [`Self::encode`], with the layout given as a channel count.
    pub fn encode_channels(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        channels: usize,
        stop: impl Stop,
    ) -> Result<Vec<u8>, BmpError> {
        let layout = layout_for_channels(channels)?;
        self.encode(pixels, width, height, layout, stop)
    }
}

pub(crate) fn layout_for_channels(channels: usize) -> Result<PixelLayout, BmpError> {
    match PixelLayout::from_channels(channels) {
        Some(layout @ (PixelLayout::Rgb8 | PixelLayout::Rgba8)) => Ok(layout),
        _ => Err(BmpError::InvalidArgument(alloc::format!(
            "invalid channel count {channels} for BMP (supported: 3, 4)"
        ))),
    }
}

/// Encode an RGB image. Alpha is written as 255.
#[cfg(feature = "imgref")]
pub fn encode_rgb8(img: imgref::ImgRef<'_, rgb::RGB8>, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
    let (width, height) = img_dimensions(img.width(), img.height())?;
    let mut buf = Vec::with_capacity(img.width() * img.height() * 3);
    for row in img.rows() {
        for px in row {
            buf.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }
    crate::bmp::encode(&buf, width, height, PixelLayout::Rgb8, None, &stop)
}

/// Encode an RGBA image.
#[cfg(feature = "imgref")]
pub fn encode_rgba8(
    img: imgref::ImgRef<'_, rgb::RGBA8>,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    let (width, height) = img_dimensions(img.width(), img.height())?;
    let mut buf = Vec::with_capacity(img.width() * img.height() * 4);
    for row in img.rows() {
        for px in row {
            buf.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }
    }
    crate::bmp::encode(&buf, width, height, PixelLayout::Rgba8, None, &stop)
}

#[cfg(feature = "imgref")]
fn img_dimensions(width: usize, height: usize) -> Result<(u32, u32), BmpError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(BmpError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        }),
    }
}
