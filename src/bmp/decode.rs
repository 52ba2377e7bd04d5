//! Streaming decoder for uncompressed bottom-up BMP files.
//!
//! Scanlines are kept exactly as stored: native bit depth, padded to a
//! 4-byte boundary, in file order (bottom row first). Nothing is converted.

use std::io::{self, Read};

use enough::Stop;

use super::header::{FileHeader, InfoHeader, V4Extension};
use crate::error::FbError;
use crate::limits::Limits;
use crate::surface::SURFACE_BITS_PER_PIXEL;

/// Upper bound on the up-front scanline allocation; larger images grow as
/// rows actually arrive.
const INITIAL_CAPACITY_CAP: usize = 1 << 22;

/// Rows decoded between cancellation checks.
const STOP_CHECK_INTERVAL: u32 = 64;

/// Bytes of real pixel data in one row, before alignment padding.
///
/// Sub-byte depths round up to a whole byte. Depths a BMP cannot carry
/// (anything outside 1/2/4/8/16/24) are treated as 4 bytes per pixel.
pub fn unpadded_row_bytes(width: u32, bits_per_pixel: u16) -> u64 {
    match bits_per_pixel {
        1 | 2 | 4 | 8 | 16 | 24 => (u64::from(width) * u64::from(bits_per_pixel)).div_ceil(8),
        _ => u64::from(width) * 4,
    }
}

/// Round a row length up to the 4-byte alignment BMP scanlines use.
pub fn padded_stride(unpadded: u64) -> u64 {
    unpadded.div_ceil(4) * 4
}

/// A decoded BMP: its headers plus every complete scanline that was read.
#[derive(Clone, Debug)]
pub struct DecodedBmp {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    /// Present when the info header announced the V4 layout.
    pub v4: Option<V4Extension>,
    stride: usize,
    pixels: Vec<u8>,
}

impl DecodedBmp {
    pub fn width(&self) -> u32 {
        self.info_header.width
    }

    /// Declared height; see [`rows_read`](Self::rows_read) for what arrived.
    pub fn height(&self) -> u32 {
        self.info_header.height
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.info_header.bits_per_pixel
    }

    /// Padded length of every scanline in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn rows_read(&self) -> u32 {
        if self.stride == 0 {
            return 0;
        }
        (self.pixels.len() / self.stride) as u32
    }

    /// Scanline `index` in file order (index 0 is the bottom image row).
    pub fn row(&self, index: u32) -> Option<&[u8]> {
        let start = (index as usize).checked_mul(self.stride)?;
        self.pixels.get(start..start.checked_add(self.stride)?)
    }

    /// All complete scanlines in file order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.pixels.chunks_exact(self.stride.max(1))
    }

    /// The stream ended before `height` rows were read.
    pub fn is_truncated(&self) -> bool {
        self.stride > 0 && self.rows_read() < self.height()
    }

    /// The image depth differs from what a 32-bit surface expects.
    pub fn bit_depth_mismatch(&self) -> bool {
        u32::from(self.bits_per_pixel()) != SURFACE_BITS_PER_PIXEL
    }
}

/// Fill `buf` from `reader`, stopping early only at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Decode a BMP from a stream positioned at its first byte.
///
/// A stream that ends inside the pixel data is not an error: the result
/// holds the rows that were complete and [`DecodedBmp::is_truncated`]
/// reports it. `stop` is polled between batches of rows.
pub fn decode_bmp<R: Read>(
    mut reader: R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodedBmp, FbError> {
    let mut fh = [0u8; FileHeader::SIZE];
    if read_full(&mut reader, &mut fh)? < FileHeader::SIZE {
        return Err(FbError::InvalidSignature);
    }
    let file_header = FileHeader::from_le_bytes(&fh);
    if !file_header.has_valid_magic() {
        return Err(FbError::InvalidSignature);
    }

    let mut ih = [0u8; InfoHeader::SIZE];
    if read_full(&mut reader, &mut ih)? < InfoHeader::SIZE {
        return Err(FbError::TruncatedHeader);
    }
    let info_header = InfoHeader::from_le_bytes(&ih);
    let mut pos = (FileHeader::SIZE + InfoHeader::SIZE) as u64;

    let v4 = if info_header.has_v4_extension() {
        let mut ext = [0u8; V4Extension::SIZE];
        if read_full(&mut reader, &mut ext)? < V4Extension::SIZE {
            return Err(FbError::TruncatedHeader);
        }
        pos += V4Extension::SIZE as u64;
        log::debug!("bitmap v4 header");
        Some(V4Extension::from_le_bytes(&ext))
    } else {
        None
    };

    // Palette or header extension we don't model.
    let data_offset = u64::from(file_header.pixel_data_offset);
    if data_offset > pos {
        let gap = data_offset - pos;
        let skipped = io::copy(&mut reader.by_ref().take(gap), &mut io::sink())?;
        log::debug!("skipped {skipped} bytes before pixel data");
    }

    let (width, height) = (info_header.width, info_header.height);
    let bpp = info_header.bits_per_pixel;
    let too_large = || FbError::DimensionsTooLarge { width, height };
    let stride = padded_stride(unpadded_row_bytes(width, bpp));
    let total = stride.checked_mul(u64::from(height)).ok_or_else(too_large)?;
    if let Some(limits) = limits {
        limits.check(width, height, total)?;
    }
    let stride = usize::try_from(stride).map_err(|_| too_large())?;
    let total = usize::try_from(total).map_err(|_| too_large())?;
    log::debug!("BMP {width}x{height}, {bpp} bpp, stride {stride}");

    let mut pixels = Vec::with_capacity(total.min(INITIAL_CAPACITY_CAP));
    if stride > 0 {
        for y in 0..height {
            if y % STOP_CHECK_INTERVAL == 0 {
                stop.check()?;
            }
            // Grows only with bytes actually present in the stream.
            let start = pixels.len();
            let n = reader.by_ref().take(stride as u64).read_to_end(&mut pixels)?;
            if n < stride {
                pixels.truncate(start);
                log::debug!("BMP pixel data ends after {y} of {height} rows");
                break;
            }
        }
    }

    Ok(DecodedBmp {
        file_header,
        info_header,
        v4,
        stride,
        pixels,
    })
}
