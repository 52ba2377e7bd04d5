//! Banner + image draw cycle, run once or on a fixed cadence.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use enough::{Stop, Unstoppable};

use crate::banner::Banner;
use crate::blit::{BlitReport, blit};
use crate::bmp::{DecodedBmp, decode_bmp};
use crate::error::FbError;
use crate::limits::Limits;
use crate::surface::{SURFACE_BITS_PER_PIXEL, Surface};

/// Sleep between cycles in [`RenderMode::Repeating`] (50 Hz).
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(20);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Draw one cycle and return.
    #[default]
    Once,
    /// Redraw every period until the stop token fires.
    Repeating,
}

/// Totals for one [`RenderLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub cycles: u64,
    /// Cycles whose image could not be read or decoded.
    pub failed_cycles: u64,
    /// Rows drawn by the last cycle that decoded successfully.
    pub last_rows_drawn: u32,
}

/// Draws a banner and then the image file onto a surface.
///
/// The file is reopened and decoded from its first byte every cycle.
#[derive(Clone, Debug)]
pub struct RenderLoop {
    image: PathBuf,
    mode: RenderMode,
    period: Duration,
    banner: Banner,
    limits: Option<Limits>,
}

impl RenderLoop {
    pub fn new(image: impl Into<PathBuf>, mode: RenderMode) -> Self {
        Self {
            image: image.into(),
            mode,
            period: DEFAULT_PERIOD,
            banner: Banner::default(),
            limits: None,
        }
    }

    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn banner(mut self, banner: Banner) -> Self {
        self.banner = banner;
        self
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// One cycle: banner, then a fresh read and blit of the image.
    pub fn draw_once(&self, surface: &mut Surface<'_>) -> Result<BlitReport, FbError> {
        self.cycle(surface).map(|(report, _)| report)
    }

    fn cycle(&self, surface: &mut Surface<'_>) -> Result<(BlitReport, DecodedBmp), FbError> {
        self.banner.fill(surface)?;
        let file = File::open(&self.image)?;
        // A started cycle always completes, so decoding is not stoppable.
        let image = decode_bmp(BufReader::new(file), self.limits.as_ref(), &Unstoppable)?;
        let report = blit(&image, surface)?;
        Ok((report, image))
    }

    /// Draw until done.
    ///
    /// `Once` returns after the first cycle, propagating its error.
    /// `Repeating` sleeps one period after every cycle and then polls
    /// `stop`; it returns once `stop` reports cancellation. The first cycle
    /// always runs. Decode and I/O failures in `Repeating` mode are logged
    /// and retried next cycle; any other error ends the loop.
    ///
    /// Image problems that repeat every cycle (a failure with the same
    /// message, a depth mismatch, short pixel data) are logged at `warn`
    /// the first time and at `debug` afterwards.
    pub fn run(&self, surface: &mut Surface<'_>, stop: &dyn Stop) -> Result<RenderReport, FbError> {
        let mut report = RenderReport::default();
        let mut notices = Notices::default();
        loop {
            report.cycles += 1;
            match self.cycle(surface) {
                Ok((blit, image)) => {
                    notices.failure = None;
                    if image.bit_depth_mismatch() {
                        let level = warn_once(&mut notices.depth_seen);
                        log::log!(
                            level,
                            "BMP Res={}x{}, bit count = {}: mismatch with {}-bit output",
                            image.width(),
                            image.height(),
                            image.bits_per_pixel(),
                            SURFACE_BITS_PER_PIXEL
                        );
                    }
                    if image.is_truncated() {
                        let level = warn_once(&mut notices.truncation_seen);
                        log::log!(
                            level,
                            "{}: pixel data ends after {} of {} rows",
                            self.image.display(),
                            image.rows_read(),
                            image.height()
                        );
                    }
                    if blit.rows_clipped > 0 {
                        log::debug!("{} image rows outside the surface", blit.rows_clipped);
                    }
                    report.last_rows_drawn = blit.rows_drawn;
                }
                Err(e) if self.mode == RenderMode::Repeating && e.is_decode() => {
                    let message = e.to_string();
                    let level = if notices.failure.as_deref() == Some(message.as_str()) {
                        log::Level::Debug
                    } else {
                        log::Level::Warn
                    };
                    log::log!(level, "{}: {message}", self.image.display());
                    notices.failure = Some(message);
                    report.failed_cycles += 1;
                }
                Err(e) => return Err(e),
            }

            if self.mode == RenderMode::Once {
                return Ok(report);
            }
            thread::sleep(self.period);
            if stop.check().is_err() {
                log::info!("stopping after {} cycles", report.cycles);
                return Ok(report);
            }
        }
    }
}

/// What [`RenderLoop::run`] has already reported at `warn`.
#[derive(Default)]
struct Notices {
    /// Message of the failure in the previous cycle, if it failed.
    failure: Option<String>,
    depth_seen: bool,
    truncation_seen: bool,
}

/// `Warn` the first time `seen` is consulted, `Debug` after.
fn warn_once(seen: &mut bool) -> log::Level {
    if std::mem::replace(seen, true) {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

