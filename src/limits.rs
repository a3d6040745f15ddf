use crate::error::BmpError;

/// Resource limits for decode/encode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the pixel buffer a decode or encode allocates.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check BMP dimensions against the width, height and pixel-count caps.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BmpError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            BmpError::LimitExceeded(alloc::format!("BMP {what} {value} exceeds limit {max}"))
        };
        if let Some(max_w) = self.max_width
            && u64::from(width) > max_w
        {
            return Err(exceeded("width", width.into(), max_w));
        }
        if let Some(max_h) = self.max_height
            && u64::from(height) > max_h
        {
            return Err(exceeded("height", height.into(), max_h));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels
            && pixels > max_px
        {
            return Err(exceeded("pixel count", pixels, max_px));
        }
        Ok(())
    }

    /// Check a pixel buffer size against `max_memory_bytes`.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), BmpError> {
        match self.max_memory_bytes {
            Some(max_mem) if bytes as u64 > max_mem => Err(BmpError::LimitExceeded(
                alloc::format!("BMP pixel buffer of {bytes} bytes exceeds memory limit {max_mem}"),
            )),
            _ => Ok(()),
        }
    }

    /// Dimension check followed by a memory check for a `bytes_per_pixel` buffer.
    pub(crate) fn check_image(
        &self,
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
    ) -> Result<(), BmpError> {
        self.check(width, height)?;
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(bytes_per_pixel))
            .ok_or(BmpError::DimensionsTooLarge { width, height })?;
        self.check_memory(bytes)
    }
}
