//! Path-based reading and writing.
//!
//! The file handle lives only inside each call and is closed on every
//! return path, including validation failures.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BmpError;

/// Read the BMP file at `path` and decode it to top-down RGBA.
pub fn read_bmp_file(path: impl AsRef<Path>, stop: impl Stop) -> Result<Bitmap, BmpError> {
    let path = path.as_ref();
    let data = {
        let mut file = File::open(path).map_err(|source| BmpError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        data
    };
    tracing::debug!(path = %path.display(), bytes = data.len(), "read BMP file");
    crate::bmp::decode(&data, None, &stop)
}

/// Encode `pixels` (RGB or RGBA, top-down) and write them to `path`.
///
/// Nothing is created on disk when the arguments are rejected. An output
/// path that cannot be created is reported as [`BmpError::FileNotFound`].
pub fn write_bmp_file(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    stop: impl Stop,
) -> Result<(), BmpError> {
    let path = path.as_ref();
    let layout = crate::encode::layout_for_channels(channels)?;
    let encoded = crate::bmp::encode(pixels, width, height, layout, None, &stop)?;

    let mut file = File::create(path).map_err(|source| BmpError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&encoded)?;
    file.flush()?;
    tracing::debug!(path = %path.display(), bytes = encoded.len(), "wrote BMP file");
    Ok(())
}
