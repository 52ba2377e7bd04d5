use crate::error::FbError;

/// Resource limits applied to a BMP's declared geometry.
///
/// All fields default to `None` (no limit). Checked after the headers are
/// parsed and before any scanline buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded scanline buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits sized for a display surface: an image may be at most `factor`
    /// times wider/taller than the screen, and its pixel data at most
    /// `factor` times the mapped length.
    pub fn for_display(width: u32, height: u32, mapped_len: usize, factor: u64) -> Self {
        Self {
            max_width: Some(u64::from(width) * factor),
            max_height: Some(u64::from(height) * factor),
            max_pixels: None,
            max_memory_bytes: Some(mapped_len as u64 * factor),
        }
    }

    /// Check a BMP's declared geometry and the scanline buffer it needs
    /// (`stride * height` bytes).
    pub(crate) fn check(
        &self,
        width: u32,
        height: u32,
        buffer_bytes: u64,
    ) -> Result<(), FbError> {
        let (width, height) = (u64::from(width), u64::from(height));
        let caps = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width * height, self.max_pixels),
            ("scanline buffer bytes", buffer_bytes, self.max_memory_bytes),
        ];
        for (what, value, max) in caps {
            if let Some(max) = max.filter(|&max| value > max) {
                return Err(FbError::LimitExceeded(format!(
                    "{what} {value} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }
}
