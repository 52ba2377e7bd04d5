#![no_main]
use fbbanner::bmp::{EncodeOptions, decode_bmp, encode_bmp, unpadded_row_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First bytes pick the geometry, the rest is pixel data.
    let [w, h, depth, flags, rest @ ..] = data else {
        return;
    };
    let width = u32::from(*w % 33);
    let height = u32::from(*h % 17);
    let bpp = [1u16, 2, 4, 8, 16, 24, 32][usize::from(*depth) % 7];
    let options = EncodeOptions {
        v4_header: flags & 1 != 0,
        pixel_data_gap: u32::from(flags >> 1),
    };

    let row_bytes = unpadded_row_bytes(width, bpp) as usize;
    let mut rows = rest.to_vec();
    rows.resize(row_bytes * height as usize, 0);

    let encoded = encode_bmp(width, height, bpp, &rows, options).unwrap();
    let decoded = decode_bmp(&encoded[..], None, &enough::Unstoppable).unwrap();

    assert_eq!(decoded.width(), width);
    assert_eq!(decoded.height(), height);
    assert_eq!(decoded.bits_per_pixel(), bpp);
    if row_bytes > 0 {
        assert_eq!(decoded.rows_read(), height);
        for (row, expected) in decoded.rows().zip(rows.chunks_exact(row_bytes)) {
            assert_eq!(&row[..row_bytes], expected, "roundtrip row mismatch");
        }
    }
});
