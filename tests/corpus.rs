//! Test corpus: hand-built BMP fixtures, error kinds, and format properties.

use zenbmp32::bmp::header::{ColorMaskHeader, FileHeader, InfoHeader, row_stride};
use zenbmp32::*;

fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

/// 24-bit BI_RGB file from top-down RGB pixels, padding filled with `pad`.
fn bmp24(width: usize, height: usize, rgb: &[u8], pad: u8) -> Vec<u8> {
    let stride = row_stride(24, width as u32).unwrap();
    let payload = stride * height;
    let file = FileHeader {
        file_size: (54 + payload) as u32,
        offset_data: 54,
        ..Default::default()
    };
    let info = InfoHeader {
        width: width as i32,
        height: height as i32,
        bits_per_pixel: 24,
        compression: 0,
        image_size: payload as u32,
        ..Default::default()
    };
    let mut out = Vec::new();
    file.write(&mut out);
    info.write(&mut out);
    for row in (0..height).rev() {
        for px in rgb[row * width * 3..(row + 1) * width * 3].chunks_exact(3) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        out.extend(std::iter::repeat_n(pad, stride - width * 3));
    }
    out
}

/// 32-bit BI_BITFIELDS file from top-down RGBA pixels with the given mask header.
fn bmp32(width: usize, height: usize, rgba: &[u8], mask: ColorMaskHeader) -> Vec<u8> {
    let payload = width * height * 4;
    let file = FileHeader {
        file_size: (138 + payload) as u32,
        offset_data: 138,
        ..Default::default()
    };
    let info = InfoHeader {
        header_size: 124,
        width: width as i32,
        height: height as i32,
        image_size: payload as u32,
        ..Default::default()
    };
    let mut out = Vec::new();
    file.write(&mut out);
    info.write(&mut out);
    mask.write(&mut out);
    for row in (0..height).rev() {
        for px in rgba[row * width * 4..(row + 1) * width * 4].chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }
    out
}

fn with_rgb_alpha(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect()
}

fn set_info(data: &mut [u8], info: impl FnOnce(&mut InfoHeader)) {
    let mut header = InfoHeader::parse(data[14..54].try_into().unwrap());
    info(&mut header);
    data[14..54].copy_from_slice(&header.to_bytes());
}

// ── Stride ───────────────────────────────────────────────────────────

#[test]
fn stride_examples() {
    assert_eq!(row_stride(24, 3), Some(12));
    assert_eq!(row_stride(24, 4), Some(12));
    assert_eq!(row_stride(32, 1), Some(4));
}

// ── 24-bit decode ────────────────────────────────────────────────────

#[test]
fn decode_24bit_all_padding_widths() {
    for width in 1..=5 {
        let height = 3;
        let rgb = noise_pattern(width, height, 3);
        let file = bmp24(width, height, &rgb, 0);
        let decoded = decode_bmp(&file, Unstoppable).unwrap();
        assert_eq!(decoded.width(), width as u32);
        assert_eq!(decoded.height(), height as u32);
        assert_eq!(decoded.channels(), 4);
        assert_eq!(decoded.layout(), PixelLayout::Rgba8);
        assert_eq!(decoded.pixels().len(), width * height * 4);
        assert_eq!(decoded.pixels(), &with_rgb_alpha(&rgb)[..], "width {width}");
    }
}

#[test]
fn decode_24bit_alpha_is_opaque() {
    let rgb = noise_pattern(7, 5, 3);
    let decoded = decode_bmp(&bmp24(7, 5, &rgb, 0), Unstoppable).unwrap();
    assert!(decoded.pixels().chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn decode_24bit_ignores_padding_content() {
    let rgb = noise_pattern(3, 4, 3);
    let clean = decode_bmp(&bmp24(3, 4, &rgb, 0), Unstoppable).unwrap();
    let dirty = decode_bmp(&bmp24(3, 4, &rgb, 0xAB), Unstoppable).unwrap();
    assert_eq!(clean.pixels(), dirty.pixels());
}

#[test]
fn decode_flips_bottom_up_rows() {
    // 1x2: top row red, bottom row blue; on disk the blue row comes first.
    let rgb = [255, 0, 0, 0, 0, 255];
    let file = bmp24(1, 2, &rgb, 0);
    assert_eq!(&file[54..57], &[255, 0, 0]); // blue in BGR
    let decoded = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &[255, 0, 0, 255, 0, 0, 255, 255]);
}

#[test]
fn decode_respects_data_offset_gap() {
    let rgb = noise_pattern(2, 2, 3);
    let mut file = bmp24(2, 2, &rgb, 0);
    // Insert 8 junk bytes between the headers and the pixel array.
    let pixels = file.split_off(54);
    file.extend_from_slice(&[0xCC; 8]);
    file.extend_from_slice(&pixels);
    file[10..14].copy_from_slice(&62u32.to_le_bytes());
    let decoded = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &with_rgb_alpha(&rgb)[..]);
}

// ── 32-bit decode ────────────────────────────────────────────────────

#[test]
fn decode_32bit_canonical() {
    let rgba = noise_pattern(5, 3, 4);
    let file = bmp32(5, 3, &rgba, ColorMaskHeader::default());
    let decoded = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &rgba[..]);
}

#[test]
fn decode_32bit_accepts_bi_rgb_compression() {
    let rgba = noise_pattern(2, 2, 4);
    let mut file = bmp32(2, 2, &rgba, ColorMaskHeader::default());
    set_info(&mut file, |h| h.compression = 0);
    let decoded = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &rgba[..]);
}

#[test]
fn roundtrip_32bit_is_idempotent() {
    for (w, h) in [(1, 1), (3, 2), (8, 8), (13, 7)] {
        let rgba = noise_pattern(w, h, 4);
        let file = bmp32(w, h, &rgba, ColorMaskHeader::default());
        let first = decode_bmp(&file, Unstoppable).unwrap();
        let reencoded = first.encode().unwrap();
        let second = decode_bmp(&reencoded, Unstoppable).unwrap();
        assert_eq!(first, second, "{w}x{h}");
        assert_eq!(second.pixels(), &rgba[..]);
    }
}

#[test]
fn roundtrip_24bit_source_is_stable_after_first_decode() {
    let rgb = noise_pattern(5, 4, 3);
    let first = decode_bmp(&bmp24(5, 4, &rgb, 0), Unstoppable).unwrap();
    let second = decode_bmp(&first.encode().unwrap(), Unstoppable).unwrap();
    assert_eq!(first.pixels(), second.pixels());
}

// ── Validation failures ──────────────────────────────────────────────

#[test]
fn bad_signature_is_format_error() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    file[0] = b'P';
    file[1] = b'6';
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);

    // Rejected on the signature alone, before the headers are complete.
    let err = decode_bmp(b"GIF89a", Unstoppable).unwrap_err();
    assert!(matches!(err, BmpError::Format(_)), "{err:?}");
}

#[test]
fn zero_masks_are_format_error() {
    let mask = ColorMaskHeader {
        red_mask: 0,
        green_mask: 0,
        blue_mask: 0,
        alpha_mask: 0,
        ..Default::default()
    };
    let file = bmp32(2, 2, &noise_pattern(2, 2, 4), mask);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn rgba_ordered_masks_are_format_error() {
    let mask = ColorMaskHeader {
        red_mask: 0x0000_00FF,
        blue_mask: 0x00FF_0000,
        ..Default::default()
    };
    let file = bmp32(2, 2, &noise_pattern(2, 2, 4), mask);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn non_srgb_color_space_is_format_error() {
    let mask = ColorMaskHeader {
        color_space_type: 0x5769_6E20, // "Win "
        ..Default::default()
    };
    let file = bmp32(2, 2, &noise_pattern(2, 2, 4), mask);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn missing_mask_header_is_format_error() {
    let mut file = bmp32(2, 2, &noise_pattern(2, 2, 4), ColorMaskHeader::default());
    set_info(&mut file, |h| h.header_size = 40);
    let err = decode_bmp(&file, Unstoppable).unwrap_err();
    match err {
        BmpError::Format(msg) => assert!(msg.contains("bit-mask"), "{msg}"),
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn short_info_header_is_format_error() {
    // 12 is the OS/2 core header size; its fields sit at different offsets.
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.header_size = 12);
    let err = decode_bmp(&file, Unstoppable).unwrap_err();
    match err {
        BmpError::Format(msg) => assert!(msg.contains("info header size 12"), "{msg}"),
        other => panic!("expected Format, got {other:?}"),
    }
}

#[test]
fn declared_sizes_are_not_enforced() {
    let rgb = noise_pattern(2, 2, 3);
    let mut file = bmp24(2, 2, &rgb, 0);
    file[2..6].copy_from_slice(&10_000u32.to_le_bytes());
    set_info(&mut file, |h| h.image_size = 0);
    file.extend_from_slice(&[0xAA; 7]);
    let image = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!(image.pixels(), &with_rgb_alpha(&rgb)[..]);
}

#[test]
fn negative_height_is_unsupported() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.height = -100);
    assert_eq!(
        decode_bmp(&file, Unstoppable).unwrap_err().kind(),
        ErrorKind::Unsupported
    );

    let mut file = bmp32(2, 2, &noise_pattern(2, 2, 4), ColorMaskHeader::default());
    set_info(&mut file, |h| h.height = -2);
    assert_eq!(
        decode_bmp(&file, Unstoppable).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
}

#[test]
fn other_bit_depths_are_unsupported() {
    for bpp in [1u16, 4, 8, 16] {
        let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
        set_info(&mut file, |h| h.bits_per_pixel = bpp);
        assert_eq!(
            decode_bmp(&file, Unstoppable).unwrap_err().kind(),
            ErrorKind::Unsupported,
            "bpp {bpp}"
        );
    }
}

#[test]
fn rle_compression_is_unsupported() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.compression = 1);
    assert_eq!(
        decode_bmp(&file, Unstoppable).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
}

#[test]
fn bitfields_on_24bit_is_format_error() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.compression = 3);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn planes_must_be_one() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.planes = 2);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn data_offset_inside_headers_is_format_error() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    file[10..14].copy_from_slice(&20u32.to_le_bytes());
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn zero_dimension_file_is_format_error() {
    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.width = 0);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);

    let mut file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    set_info(&mut file, |h| h.height = 0);
    assert_eq!(decode_bmp(&file, Unstoppable).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn truncated_headers() {
    let file = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    for len in [0, 2, 13, 14, 30, 53] {
        let err = decode_bmp(&file[..len], Unstoppable).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated, "len {len}");
    }

    let file = bmp32(2, 2, &noise_pattern(2, 2, 4), ColorMaskHeader::default());
    let err = decode_bmp(&file[..100], Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

#[test]
fn truncated_pixel_data_reports_sizes() {
    let file = bmp24(3, 3, &noise_pattern(3, 3, 3), 0);
    assert_eq!(file.len(), 54 + 36);
    let err = decode_bmp(&file[..file.len() - 1], Unstoppable).unwrap_err();
    match err {
        BmpError::Truncated { needed, actual } => {
            assert_eq!(needed, 90);
            assert_eq!(actual, 89);
        }
        other => panic!("expected Truncated, got {other:?}"),
    }
}

#[test]
fn trailing_bytes_are_ignored() {
    let rgb = noise_pattern(2, 2, 3);
    let mut file = bmp24(2, 2, &rgb, 0);
    file.extend_from_slice(&[1, 2, 3, 4]);
    let decoded = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &with_rgb_alpha(&rgb)[..]);
}

// ── Encode ───────────────────────────────────────────────────────────

#[test]
fn encode_red_rgb_decodes_opaque_red() {
    let pixels = [255u8, 0, 0].repeat(100);
    let file = encode_bmp(&pixels, 10, 10, 3, Unstoppable).unwrap();
    let decoded = decode_bmp(&file, Unstoppable).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (10, 10));
    assert!(decoded.pixels().chunks_exact(4).all(|p| p == [255, 0, 0, 255]));
}

#[test]
fn encoded_headers_are_canonical() {
    let pixels = noise_pattern(3, 2, 4);
    let file = encode_bmp(&pixels, 3, 2, 4, Unstoppable).unwrap();
    assert_eq!(&file[0..2], b"BM");
    assert_eq!(file.len(), 138 + 24);

    let headers = probe_bmp(&file).unwrap();
    assert_eq!(headers.file.file_size as usize, file.len());
    assert_eq!(headers.file.offset_data, 138);
    assert_eq!(headers.info.header_size, 124);
    assert_eq!(headers.info.bits_per_pixel, 32);
    assert_eq!(headers.info.planes, 1);
    assert_eq!(headers.info.compression, 3);
    assert_eq!(headers.info.image_size, 24);
    assert_eq!(headers.color_mask, Some(ColorMaskHeader::default()));
}

#[test]
fn encode_rejects_bad_channel_counts() {
    for channels in [0usize, 1, 2, 5] {
        let pixels = vec![0u8; 4 * channels];
        let err = encode_bmp(&pixels, 2, 2, channels, Unstoppable).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "channels {channels}");
    }
    let err = encode_bmp_layout(&[0; 4], 2, 2, PixelLayout::Gray8, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn encode_rejects_buffer_length_mismatch() {
    let short = vec![0u8; 2 * 2 * 3 - 1];
    let err = encode_bmp(&short, 2, 2, 3, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let long = vec![0u8; 2 * 2 * 4 + 4];
    let err = encode_bmp(&long, 2, 2, 4, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn zero_size_is_rejected_consistently() {
    let err = encode_bmp(&[], 0, 0, 4, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = encode_bmp(&[], 0, 5, 3, Unstoppable).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = Bitmap::new(0, 0, 4, Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_reject_before_decoding() {
    let file = bmp24(4, 4, &noise_pattern(4, 4, 3), 0);
    let limits = Limits {
        max_width: Some(3),
        ..Default::default()
    };
    let err = DecodeRequest::new(&file)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    assert!(err.to_string().contains("BMP width 4 exceeds limit 3"), "{err}");

    let limits = Limits {
        max_memory_bytes: Some(63),
        ..Default::default()
    };
    let err = DecodeRequest::new(&file)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    assert!(err.to_string().contains("64 bytes exceeds memory limit 63"), "{err}");

    let limits = Limits {
        max_memory_bytes: Some(64),
        ..Default::default()
    };
    DecodeRequest::new(&file)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap();
}

#[test]
fn limits_apply_to_encode() {
    let limits = Limits {
        max_pixels: Some(3),
        ..Default::default()
    };
    let pixels = noise_pattern(2, 2, 3);
    let err = EncodeRequest::new()
        .with_limits(&limits)
        .encode(&pixels, 2, 2, PixelLayout::Rgb8, Unstoppable)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

// ── Diagnostics ──────────────────────────────────────────────────────

#[test]
fn header_dump_lists_fields() {
    let file = encode_bmp(&noise_pattern(2, 3, 4), 2, 3, 4, Unstoppable).unwrap();
    let dump = probe_bmp(&file).unwrap().to_string();
    assert!(dump.contains("file type        = 0x4d42"), "{dump}");
    assert!(dump.contains("width            = 2"), "{dump}");
    assert!(dump.contains("height           = 3"), "{dump}");
    assert!(dump.contains("bit count        = 32"), "{dump}");
    assert!(dump.contains("red mask         = 0x00ff0000"), "{dump}");
    assert!(dump.contains("color space type = 0x73524742"), "{dump}");

    let file24 = bmp24(2, 2, &noise_pattern(2, 2, 3), 0);
    let dump = probe_bmp(&file24).unwrap().to_string();
    assert!(dump.contains("bit count        = 24"), "{dump}");
    assert!(!dump.contains("red mask"), "{dump}");
}

#[test]
fn probe_validates_without_pixels() {
    let file = bmp24(4, 4, &noise_pattern(4, 4, 3), 0);
    // Pixel data cut off: headers are still fine.
    let headers = probe_bmp(&file[..54]).unwrap();
    assert_eq!((headers.width(), headers.height()), (4, 4));
    assert_eq!(headers.source_channels(), 3);
    assert!(headers.color_mask.is_none());
}
