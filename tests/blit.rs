use enough::Unstoppable;
use fbbanner::bmp::{EncodeOptions, decode_bmp, encode_bmp};
use fbbanner::*;

const RED: [u8; 4] = [0, 0, 255, 0];
const BLUE: [u8; 4] = [255, 0, 0, 0];
const SENTINEL: u8 = 0xAA;

/// A 32-bit image whose every pixel in file row `y` is `colors[y]`.
fn solid_rows(width: u32, colors: &[[u8; 4]]) -> DecodedBmp {
    let rows: Vec<u8> = colors
        .iter()
        .flat_map(|c| c.repeat(width as usize))
        .collect();
    let data = encode_bmp(width, colors.len() as u32, 32, &rows, EncodeOptions::default()).unwrap();
    decode_bmp(&data[..], None, &Unstoppable).unwrap()
}

/// A noisy 32-bit image of the given size.
fn noise(width: u32, height: u32) -> DecodedBmp {
    let mut state: u32 = 0xDEAD_BEEF;
    let rows: Vec<u8> = (0..width * height * 4)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    let data = encode_bmp(width, height, 32, &rows, EncodeOptions::default()).unwrap();
    decode_bmp(&data[..], None, &Unstoppable).unwrap()
}

#[test]
fn bottom_up_rows_are_flipped() {
    let image = solid_rows(2, &[RED, BLUE]);
    let info = SurfaceInfo::packed(2, 2, 32);
    let mut buf = vec![0u8; 16];
    let report = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();

    assert_eq!(report.rows_drawn, 2);
    assert_eq!(&buf[0..4], &BLUE);
    assert_eq!(&buf[4..8], &BLUE);
    assert_eq!(&buf[8..12], &RED);
    assert_eq!(&buf[12..16], &RED);
}

#[test]
fn never_writes_past_stride_times_height() {
    // Image wider and taller than the surface, then narrower and shorter.
    for (img_w, img_h) in [(7u32, 9u32), (2, 2), (5, 3), (1, 12)] {
        let image = noise(img_w, img_h);
        let info = SurfaceInfo::packed(5, 3, 32);
        let limit = info.stride * info.height as usize;
        let mut buf = vec![SENTINEL; limit + 64];
        let _ = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
        assert!(
            buf[limit..].iter().all(|&b| b == SENTINEL),
            "{img_w}x{img_h} overran the surface"
        );
    }
}

#[test]
fn padded_device_stride_keeps_row_tail() {
    // Device rows are 24 bytes but only 16 are visible.
    let info = SurfaceInfo {
        stride: 24,
        ..SurfaceInfo::packed(4, 2, 32)
    };
    let image = solid_rows(2, &[RED, BLUE]);
    let mut buf = vec![SENTINEL; 48];
    blit(&image, &mut Surface::new(info, &mut buf)).unwrap();

    // Narrow source: only 8 bytes per row are written.
    assert_eq!(&buf[0..8], [BLUE, BLUE].concat().as_slice());
    assert!(buf[8..24].iter().all(|&b| b == SENTINEL));
    assert_eq!(&buf[24..32], [RED, RED].concat().as_slice());
    assert!(buf[32..48].iter().all(|&b| b == SENTINEL));
}

#[test]
fn wide_source_is_clipped_to_row_capacity() {
    let info = SurfaceInfo::packed(2, 2, 32);
    let image = solid_rows(4, &[RED, BLUE]);
    let mut buf = vec![0u8; 16];
    let report = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
    assert_eq!(report.rows_drawn, 2);
    assert_eq!(&buf[0..8], [BLUE, BLUE].concat().as_slice());
    assert_eq!(&buf[8..16], [RED, RED].concat().as_slice());
}

#[test]
fn tall_source_clips_rows_below_the_surface() {
    let info = SurfaceInfo::packed(1, 2, 32);
    let image = solid_rows(1, &[RED, RED, BLUE, BLUE]);
    let mut buf = vec![0u8; 8];
    let report = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
    // File rows 0 and 1 map to display rows 3 and 2.
    assert_eq!(report.rows_clipped, 2);
    assert_eq!(report.rows_drawn, 2);
    assert_eq!(&buf[..], [BLUE, BLUE].concat().as_slice());
}

#[test]
fn origin_offset_shifts_the_image() {
    let info = SurfaceInfo {
        x_offset: 1,
        y_offset: 1,
        stride: 12,
        ..SurfaceInfo::packed(2, 2, 32)
    };
    let image = solid_rows(1, &[RED]);
    let mut buf = vec![0u8; info.required_len().unwrap()];
    blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
    assert_eq!(&buf[16..20], &RED);
    assert!(buf[..16].iter().all(|&b| b == 0));
}

#[test]
fn origin_past_row_end_counts_as_clipped() {
    // x_offset * 4 == stride: every row has zero writable bytes.
    let info = SurfaceInfo {
        x_offset: 2,
        stride: 8,
        ..SurfaceInfo::packed(1, 1, 32)
    };
    let image = solid_rows(1, &[RED]);
    let mut buf = vec![0u8; 16];
    let report = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
    assert_eq!(
        report,
        BlitReport {
            rows_drawn: 0,
            rows_clipped: 1
        }
    );
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn truncated_image_draws_only_rows_read() {
    let rows: Vec<u8> = [RED, RED, BLUE, BLUE].concat();
    let data = encode_bmp(1, 4, 32, &rows, EncodeOptions::default()).unwrap();
    let image = decode_bmp(&data[..54 + 4 + 2], None, &Unstoppable).unwrap();
    assert_eq!(image.rows_read(), 1);

    let info = SurfaceInfo::packed(1, 4, 32);
    let mut buf = vec![SENTINEL; 16];
    let report = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
    assert_eq!(report.rows_drawn, 1);
    // Only the bottom display row was written.
    assert!(buf[..12].iter().all(|&b| b == SENTINEL));
    assert_eq!(&buf[12..16], &RED);
}

#[test]
fn non_32_bit_surface_is_refused() {
    let image = solid_rows(2, &[RED]);
    let mut buf = vec![0u8; 8];
    let err = blit(&image, &mut Surface::new(SurfaceInfo::packed(2, 2, 16), &mut buf)).unwrap_err();
    assert!(matches!(
        err,
        FbError::UnsupportedSurfaceDepth { bits_per_pixel: 16 }
    ));
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn banner_fills_top_band_only() {
    let info = SurfaceInfo::packed(3, 4, 32);
    let mut buf = vec![0u8; 48];
    let banner = Banner {
        height: 2,
        color: [1, 2, 3, 4],
    };
    banner.fill(&mut Surface::new(info, &mut buf)).unwrap();
    assert_eq!(&buf[..24], [1, 2, 3, 4].repeat(6).as_slice());
    assert!(buf[24..].iter().all(|&b| b == 0));
}

#[test]
fn banner_taller_than_surface_is_clipped() {
    let info = SurfaceInfo::packed(2, 2, 32);
    let mut buf = vec![SENTINEL; 24];
    Banner::default()
        .fill(&mut Surface::new(info, &mut buf))
        .unwrap();
    assert_eq!(&buf[..16], DEFAULT_BANNER_COLOR.repeat(4).as_slice());
    assert!(buf[16..].iter().all(|&b| b == SENTINEL));
}

#[test]
fn banner_refuses_non_32_bit_surface() {
    let mut buf = vec![0u8; 12];
    let err = Banner::default()
        .fill(&mut Surface::new(SurfaceInfo::packed(2, 2, 24), &mut buf))
        .unwrap_err();
    assert!(matches!(err, FbError::UnsupportedSurfaceDepth { .. }));
}
