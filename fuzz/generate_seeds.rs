#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, bpp: u16, info_size: u32, gap: u32, pixels: &[u8]) -> Vec<u8> {
    let headers = 14 + info_size;
    let offset = headers + gap;
    let mut out = vec![0u8; offset as usize];
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(offset + pixels.len() as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&info_size.to_le_bytes()); // info header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 2x2 32-bit, bottom row red, top row blue (BGRA)
    let px = [0, 0, 255, 0, 0, 0, 255, 0, 255, 0, 0, 0, 255, 0, 0, 0];
    fs::write(format!("{dir}/bgra_2x2.bmp"), bmp(2, 2, 32, 40, 0, &px)).unwrap();

    // Same image with a V4 header
    fs::write(format!("{dir}/bgra_2x2_v4.bmp"), bmp(2, 2, 32, 108, 0, &px)).unwrap();

    // 1x1 24-bit (3 bytes + 1 padding)
    fs::write(format!("{dir}/bgr_1x1.bmp"), bmp(1, 1, 24, 40, 0, &[0xff, 0, 0, 0])).unwrap();

    // 8-bit with a 1024-byte palette gap
    fs::write(format!("{dir}/pal8_4x1.bmp"), bmp(4, 1, 8, 40, 1024, &[0, 1, 2, 3])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/truncated_rows.bmp"), bmp(2, 8, 32, 40, 0, &px)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
