//! Copy decoded scanlines onto a surface.

use crate::bmp::DecodedBmp;
use crate::error::FbError;
use crate::surface::{SURFACE_BITS_PER_PIXEL, Surface};

/// What one [`blit`] call wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlitReport {
    /// Scanlines copied to the surface.
    pub rows_drawn: u32,
    /// Decoded scanlines that fell outside the surface.
    pub rows_clipped: u32,
}

/// Draw `image` at the surface origin, flipping bottom-up BMP rows into
/// top-down display rows.
///
/// File row `y` lands on display row `height - 1 - y`. Each row copies
/// `min(image stride, row capacity)` bytes unchanged; only rows that were
/// actually decoded are written.
pub fn blit(image: &DecodedBmp, surface: &mut Surface<'_>) -> Result<BlitReport, FbError> {
    surface.require_depth(SURFACE_BITS_PER_PIXEL)?;

    let height = image.height();
    let mut report = BlitReport::default();
    for (y, src) in (0u32..).zip(image.rows()) {
        let dst_y = height - 1 - y;
        match surface.row_mut(dst_y) {
            // An origin past the end of the row leaves nothing to write.
            Some(dst) if !dst.is_empty() => {
                let n = src.len().min(dst.len());
                dst[..n].copy_from_slice(&src[..n]);
                report.rows_drawn += 1;
            }
            _ => report.rows_clipped += 1,
        }
    }
    log::trace!(
        "blit: {} rows drawn, {} clipped",
        report.rows_drawn,
        report.rows_clipped
    );
    Ok(report)
}
