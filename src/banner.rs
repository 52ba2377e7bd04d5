//! Solid band drawn across the top of the surface before each image.

use crate::error::FbError;
use crate::surface::{SURFACE_BITS_PER_PIXEL, Surface};

/// Rows covered by the default banner.
pub const DEFAULT_BANNER_HEIGHT: u32 = 81;

/// Opaque white in the framebuffer's B, G, R, X byte order.
pub const DEFAULT_BANNER_COLOR: [u8; 4] = [255, 255, 255, 0];

/// A full-width band of `height` rows filled with `color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Banner {
    pub height: u32,
    /// Raw pixel bytes, written as-is.
    pub color: [u8; 4],
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            height: DEFAULT_BANNER_HEIGHT,
            color: DEFAULT_BANNER_COLOR,
        }
    }
}

impl Banner {
    /// Fill the band. Rows past the bottom of the surface are skipped.
    pub fn fill(&self, surface: &mut Surface<'_>) -> Result<(), FbError> {
        surface.require_depth(SURFACE_BITS_PER_PIXEL)?;
        let (width, rows) = (surface.info().width, self.height.min(surface.info().height));
        for y in 0..rows {
            for x in 0..width {
                if let Some(px) = surface.pixel_mut(x, y) {
                    px.copy_from_slice(&self.color);
                }
            }
        }
        Ok(())
    }
}
