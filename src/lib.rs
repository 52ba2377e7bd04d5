//! # fbbanner
//!
//! Draw a BMP image onto a Linux framebuffer, once or repeatedly until
//! interrupted.
//!
//! ## Pipeline
//!
//! Each render cycle fills a solid [`Banner`] band, re-reads the image file
//! from its first byte, decodes it with [`decode_bmp`] and copies the
//! scanlines onto a [`Surface`] with [`blit`], turning the bottom-up BMP
//! rows into top-down display rows.
//!
//! - [`bmp`]: file header, info header, optional V4 extension and raw
//!   padded scanlines. No palette lookup, bitfields or compression.
//! - [`Surface`]: stride-aware, bounds-checked view of a pixel buffer.
//! - [`RenderLoop`]: `Once` or `Repeating` at a fixed period, stopped by
//!   any [`Stop`] token such as [`CancelToken`].
//! - [`device`]: Linux fbdev geometry and memory mapping.
//!
//! ## Non-Goals
//!
//! - Color conversion: pixels are copied byte for byte, so the image should
//!   be 32-bit to match a 32-bit framebuffer.
//! - Compressed or top-down BMPs
//! - Animation, windowing or compositing
//!
//! ## Usage
//!
//! ```no_run
//! use fbbanner::{CancelToken, RenderLoop, RenderMode, device::Framebuffer};
//!
//! let mut fb = Framebuffer::open("/dev/fb0")?;
//! let token = CancelToken::new();
//! fbbanner::cancel::spawn_signal_listener(token.clone())?;
//!
//! let report = RenderLoop::new("logo.bmp", RenderMode::Repeating)
//!     .run(&mut fb.surface(), &token)?;
//! println!("{} cycles", report.cycles);
//! # Ok::<(), fbbanner::FbError>(())
//! ```

mod banner;
mod blit;
mod error;
mod limits;
mod render;
mod surface;

pub mod bmp;
pub mod cancel;
pub mod cli;
pub mod device;
pub mod logger;

// Re-exports
pub use banner::{Banner, DEFAULT_BANNER_COLOR, DEFAULT_BANNER_HEIGHT};
pub use blit::{BlitReport, blit};
pub use bmp::{DecodedBmp, decode_bmp};
pub use cancel::CancelToken;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::FbError;
pub use limits::Limits;
pub use render::{DEFAULT_PERIOD, RenderLoop, RenderMode, RenderReport};
pub use surface::{SURFACE_BITS_PER_PIXEL, Surface, SurfaceInfo};
