//! Device-independent view of a linear framebuffer.

use crate::error::FbError;

/// Pixel depth every writer in this crate produces, and the depth images
/// are expected to carry since rows are copied unconverted.
pub const SURFACE_BITS_PER_PIXEL: u32 = 32;

/// Geometry of a display surface as reported by the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInfo {
    /// Visible pixels per row.
    pub width: u32,
    /// Visible rows.
    pub height: u32,
    pub bits_per_pixel: u32,
    /// Bytes from the start of one row to the next. May exceed
    /// `width * bytes_per_pixel` when the device pads rows.
    pub stride: usize,
    /// Origin of the visible area inside the buffer.
    pub x_offset: u32,
    pub y_offset: u32,
}

impl SurfaceInfo {
    /// Tightly packed geometry with the origin at (0, 0).
    pub fn packed(width: u32, height: u32, bits_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
            stride: width as usize * (bits_per_pixel as usize / 8),
            x_offset: 0,
            y_offset: 0,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel as usize / 8
    }

    /// Byte offset of device pixel (x, y):
    /// `(x + x_offset) * bytes_per_pixel + (y + y_offset) * stride`.
    ///
    /// No bounds are applied; use [`Surface::pixel_mut`] or
    /// [`Surface::row_mut`] to write.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (x as usize + self.x_offset as usize) * self.bytes_per_pixel()
            + (y as usize + self.y_offset as usize) * self.stride
    }

    fn checked_offset(&self, x: u32, y: u32) -> Option<usize> {
        let col = (x as usize)
            .checked_add(self.x_offset as usize)?
            .checked_mul(self.bytes_per_pixel())?;
        let row = (y as usize)
            .checked_add(self.y_offset as usize)?
            .checked_mul(self.stride)?;
        col.checked_add(row)
    }

    /// Bytes a row can hold from the visible origin to the next row.
    pub fn row_capacity(&self) -> usize {
        self.stride
            .saturating_sub(self.x_offset as usize * self.bytes_per_pixel())
    }

    /// Smallest buffer length that holds every visible pixel.
    pub fn required_len(&self) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return Some(0);
        }
        self.checked_offset(self.width - 1, self.height - 1)?
            .checked_add(self.bytes_per_pixel())
    }
}

/// A framebuffer geometry bound to the bytes it describes.
///
/// Every write goes through a bounds-checked accessor: coordinates must lie
/// inside `width` x `height` and the addressed bytes inside the buffer.
pub struct Surface<'a> {
    info: SurfaceInfo,
    buf: &'a mut [u8],
}

impl<'a> Surface<'a> {
    pub fn new(info: SurfaceInfo, buf: &'a mut [u8]) -> Self {
        Self { info, buf }
    }

    pub fn info(&self) -> &SurfaceInfo {
        &self.info
    }

    /// Fail unless the surface uses `bits_per_pixel`.
    pub fn require_depth(&self, bits_per_pixel: u32) -> Result<(), FbError> {
        if self.info.bits_per_pixel != bits_per_pixel {
            return Err(FbError::UnsupportedSurfaceDepth {
                bits_per_pixel: self.info.bits_per_pixel,
            });
        }
        Ok(())
    }

    /// Bytes of pixel (x, y), or `None` outside the surface.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.info.width || y >= self.info.height {
            return None;
        }
        let start = self.info.checked_offset(x, y)?;
        let end = start.checked_add(self.info.bytes_per_pixel())?;
        self.buf.get_mut(start..end)
    }

    /// Row `y` from the visible origin up to the start of the next row,
    /// clipped to the buffer. `None` outside the surface.
    pub fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.info.height {
            return None;
        }
        let start = self.info.checked_offset(0, y)?;
        if start >= self.buf.len() {
            return None;
        }
        let end = start
            .saturating_add(self.info.row_capacity())
            .min(self.buf.len());
        Some(&mut self.buf[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_info() -> SurfaceInfo {
        SurfaceInfo {
            width: 4,
            height: 3,
            bits_per_pixel: 32,
            stride: 20,
            x_offset: 1,
            y_offset: 2,
        }
    }

    #[test]
    fn offset_formula() {
        let info = padded_info();
        assert_eq!(info.offset(0, 0), 4 + 2 * 20);
        assert_eq!(info.offset(3, 2), 4 * 4 + 4 * 20);
        assert_eq!(SurfaceInfo::packed(10, 10, 32).offset(2, 1), 8 + 40);
    }

    #[test]
    fn accessors_reject_out_of_range() {
        let info = padded_info();
        let mut buf = vec![0u8; info.required_len().unwrap()];
        let mut surface = Surface::new(info, &mut buf);
        assert!(surface.pixel_mut(4, 0).is_none());
        assert!(surface.pixel_mut(0, 3).is_none());
        assert!(surface.row_mut(3).is_none());
        assert_eq!(surface.pixel_mut(3, 2).map(|p| p.len()), Some(4));
    }

    #[test]
    fn row_is_clipped_to_buffer() {
        let info = padded_info();
        let len = info.required_len().unwrap();
        let mut buf = vec![0u8; len];
        let mut surface = Surface::new(info, &mut buf);
        // Last row: origin at 4 + 4 * 20, ends at the buffer end.
        assert_eq!(surface.row_mut(2).unwrap().len(), len - (4 + 4 * 20));
        assert_eq!(surface.row_mut(0).unwrap().len(), 16);
    }

    #[test]
    fn short_buffer_yields_none() {
        let info = SurfaceInfo::packed(2, 2, 32);
        let mut buf = vec![0u8; 8];
        let mut surface = Surface::new(info, &mut buf);
        assert!(surface.row_mut(1).is_none());
        assert!(surface.pixel_mut(0, 1).is_none());
        assert!(surface.pixel_mut(1, 0).is_some());
    }

    #[test]
    fn depth_check() {
        let mut buf = [0u8; 0];
        let surface = Surface::new(SurfaceInfo::packed(0, 0, 16), &mut buf);
        assert!(matches!(
            surface.require_depth(32),
            Err(FbError::UnsupportedSurfaceDepth { bits_per_pixel: 16 })
        ));
    }
}
