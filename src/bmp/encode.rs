//! BMP writer for uncompressed bottom-up images.

use super::decode::{padded_stride, unpadded_row_bytes};
use super::header::{BMP_MAGIC, FileHeader, InfoHeader, V4_INFO_HEADER_SIZE, V4Extension};
use crate::error::FbError;

/// Header layout choices for [`encode_bmp`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeOptions {
    /// Write a 108-byte V4 info header (with BGRA channel masks).
    pub v4_header: bool,
    /// Zero bytes inserted between the headers and the pixel data.
    pub pixel_data_gap: u32,
}

/// Write an uncompressed BMP.
///
/// `rows` holds `height` unpadded rows in file order (bottom row first),
/// each [`unpadded_row_bytes`] long. Rows are padded to 4 bytes on output.
pub fn encode_bmp(
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    rows: &[u8],
    options: EncodeOptions,
) -> Result<Vec<u8>, FbError> {
    let too_large = || FbError::DimensionsTooLarge { width, height };
    let row_bytes =
        usize::try_from(unpadded_row_bytes(width, bits_per_pixel)).map_err(|_| too_large())?;
    let stride = usize::try_from(padded_stride(row_bytes as u64)).map_err(|_| too_large())?;
    let needed = row_bytes.checked_mul(height as usize).ok_or_else(too_large)?;
    if rows.len() < needed {
        return Err(FbError::BufferTooSmall {
            needed,
            actual: rows.len(),
        });
    }

    let header_len = FileHeader::SIZE
        + InfoHeader::SIZE
        + if options.v4_header { V4Extension::SIZE } else { 0 };
    let data_offset = header_len
        .checked_add(options.pixel_data_gap as usize)
        .ok_or_else(too_large)?;
    let image_size = stride.checked_mul(height as usize).ok_or_else(too_large)?;
    let file_size = data_offset.checked_add(image_size).ok_or_else(too_large)?;

    let file_header = FileHeader {
        magic: BMP_MAGIC,
        file_size: u32::try_from(file_size).map_err(|_| too_large())?,
        reserved1: 0,
        reserved2: 0,
        pixel_data_offset: data_offset as u32,
    };
    let info_header = InfoHeader {
        size: if options.v4_header {
            V4_INFO_HEADER_SIZE
        } else {
            InfoHeader::SIZE as u32
        },
        width,
        height,
        planes: 1,
        bits_per_pixel,
        compression: 0,
        image_size: image_size as u32,
        x_pixels_per_meter: 2835, // ~72 DPI
        y_pixels_per_meter: 2835,
        colors_used: 0,
        colors_important: 0,
    };

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(&file_header.to_le_bytes());
    out.extend_from_slice(&info_header.to_le_bytes());
    if options.v4_header {
        let ext = V4Extension {
            red_mask: 0x00FF_0000,
            green_mask: 0x0000_FF00,
            blue_mask: 0x0000_00FF,
            alpha_mask: 0xFF00_0000,
            color_space_type: u32::from_be_bytes(*b"sRGB"),
            ..V4Extension::default()
        };
        out.extend_from_slice(&ext.to_le_bytes());
    }
    out.resize(data_offset, 0);

    let pad = stride - row_bytes;
    if row_bytes > 0 {
        for row in rows[..needed].chunks_exact(row_bytes) {
            out.extend_from_slice(row);
            out.extend(core::iter::repeat_n(0u8, pad));
        }
    }
    Ok(out)
}
