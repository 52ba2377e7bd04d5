use enough::StopReason;

/// Errors from BMP decoding, device setup and rendering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FbError {
    #[error("not a BMP file (missing \"BM\" signature)")]
    InvalidSignature,

    #[error("BMP info header is truncated")]
    TruncatedHeader,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("{0}")]
    Config(String),

    #[error("{context}: {source}")]
    Device {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported surface depth: {bits_per_pixel} bits per pixel (only 32 is supported)")]
    UnsupportedSurfaceDepth { bits_per_pixel: u32 },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for FbError {
    fn from(r: StopReason) -> Self {
        FbError::Cancelled(r)
    }
}

impl FbError {
    /// Failures tied to reading one copy of the image.
    ///
    /// A repeating render loop logs these and tries again on the next cycle.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignature
                | Self::TruncatedHeader
                | Self::Io(_)
                | Self::DimensionsTooLarge { .. }
                | Self::LimitExceeded(_)
        )
    }

    pub(crate) fn device(context: &'static str) -> Self {
        FbError::Device {
            context,
            source: std::io::Error::last_os_error(),
        }
    }
}
