//! Windows bitmap (BMP) headers, decoder and writer.
//!
//! Only what the framebuffer path needs: the 14-byte file header, the
//! 40-byte info header, an optional V4 extension that is read and skipped,
//! and raw uncompressed scanlines.

pub mod decode;
pub mod encode;
pub mod header;

pub use decode::{DecodedBmp, decode_bmp, padded_stride, unpadded_row_bytes};
pub use encode::{EncodeOptions, encode_bmp};
pub use header::{BMP_MAGIC, FileHeader, InfoHeader, V4_INFO_HEADER_SIZE, V4Extension};
