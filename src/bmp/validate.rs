//! Conformance checks for the color mask header.
//!
//! Only the canonical BGRA bitfield layout in sRGB is accepted. Anything
//! else is reported as an error instead of being reinterpreted.

use super::header::{ALPHA_MASK, BLUE_MASK, ColorMaskHeader, GREEN_MASK, LCS_SRGB, RED_MASK};
use crate::error::BmpError;

/// Require the exact canonical masks (R=0x00FF0000, G=0x0000FF00,
/// B=0x000000FF, A=0xFF000000).
pub fn check_color_mask(header: &ColorMaskHeader) -> Result<(), BmpError> {
    let found = [
        header.red_mask,
        header.green_mask,
        header.blue_mask,
        header.alpha_mask,
    ];
    if found != [RED_MASK, GREEN_MASK, BLUE_MASK, ALPHA_MASK] {
        return Err(BmpError::Format(alloc::format!(
            "unexpected color masks r={:#010x} g={:#010x} b={:#010x} a={:#010x}, expected BGRA",
            found[0],
            found[1],
            found[2],
            found[3]
        )));
    }
    Ok(())
}

/// Require the sRGB color-space tag.
pub fn check_color_space(header: &ColorMaskHeader) -> Result<(), BmpError> {
    if header.color_space_type != LCS_SRGB {
        return Err(BmpError::Format(alloc::format!(
            "unexpected color space type {:#010x}, expected sRGB",
            header.color_space_type
        )));
    }
    Ok(())
}
