#![no_main]
use fbbanner::{Limits, Surface, SurfaceInfo, blit, decode_bmp};
use libfuzzer_sys::fuzz_target;

const SENTINEL: u8 = 0x5A;

fuzz_target!(|data: &[u8]| {
    // Decode must never panic; bound the geometry so huge headers stay cheap.
    let limits = Limits {
        max_width: Some(4096),
        max_height: Some(4096),
        ..Limits::default()
    };
    let Ok(image) = decode_bmp(data, Some(&limits), &enough::Unstoppable) else {
        return;
    };
    assert!(image.rows_read() <= image.height());

    // Blit into a padded surface; nothing past stride * height may change.
    let info = SurfaceInfo {
        stride: 7 * 4 + 8,
        ..SurfaceInfo::packed(7, 5, 32)
    };
    let limit = info.stride * info.height as usize;
    let mut buf = vec![SENTINEL; limit + 32];
    let report = blit(&image, &mut Surface::new(info, &mut buf)).unwrap();
    assert_eq!(report.rows_drawn + report.rows_clipped, image.rows_read());
    assert!(buf[limit..].iter().all(|&b| b == SENTINEL));
});
