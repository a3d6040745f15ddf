use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BmpError;
use crate::limits::Limits;

/// Builder for decoding a BMP held in memory.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before any pixel allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode to a top-down RGBA [`Bitmap`].
    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BmpError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
