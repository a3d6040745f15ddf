use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BmpError;
use crate::pixel::PixelLayout;

/// An owned image: tightly packed, top-down, interleaved pixels.
///
/// Decoding always yields [`PixelLayout::Rgba8`]; [`Bitmap::new`] also
/// accepts `Rgb8` buffers destined for encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl Bitmap {
    pub(crate) fn from_parts(pixels: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }

    /// Wrap a caller-supplied buffer of `width * height * channels` bytes
    /// (RGB or RGBA, top-down) for writing.
    pub fn new(width: u32, height: u32, channels: usize, pixels: Vec<u8>) -> Result<Self, BmpError> {
        let layout = crate::encode::layout_for_channels(channels)?;
        if width == 0 || height == 0 {
            return Err(BmpError::InvalidArgument(alloc::format!(
                "cannot create a {width}x{height} bitmap"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(channels))
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(BmpError::InvalidArgument(alloc::format!(
                "pixel buffer is {} bytes, {width}x{height}x{channels} needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self::from_parts(pixels, width, height, layout))
    }

    /// Decode an in-memory BMP.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BmpError> {
        crate::bmp::decode(data, None, &enough::Unstoppable)
    }

    /// Read and decode the BMP file at `path`.
    #[cfg(feature = "std")]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, BmpError> {
        crate::file::read_bmp_file(path, enough::Unstoppable)
    }

    /// Serialize to a 32-bit BMP. Headers are derived from this buffer.
    pub fn encode(&self) -> Result<Vec<u8>, BmpError> {
        crate::bmp::encode(
            &self.pixels,
            self.width,
            self.height,
            self.layout,
            None,
            &enough::Unstoppable,
        )
    }

    /// Encode and write to `path`, replacing any existing file.
    #[cfg(feature = "std")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), BmpError> {
        crate::file::write_bmp_file(
            path,
            &self.pixels,
            self.width,
            self.height,
            self.layout.channels(),
            enough::Unstoppable,
        )
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BmpError::InvalidArgument`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BmpError::InvalidArgument(alloc::format!(
                "bitmap is {:?}, requested {:?}",
                self.layout,
                P::layout()
            )));
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Copy into an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}
