//! Log volume of a repeating loop. Kept in its own test binary because it
//! installs a process-wide logger.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use fbbanner::bmp::{EncodeOptions, encode_bmp};
use fbbanner::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Counts `warn` records coming from this crate.
struct CountWarnings(AtomicUsize);

impl Log for CountWarnings {
    fn enabled(&self, _meta: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn && record.target().starts_with("fbbanner") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

static WARNINGS: CountWarnings = CountWarnings(AtomicUsize::new(0));

/// Allows `n` more cycles, then reports cancellation.
struct CancelAfter(AtomicU32);

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), StopReason> {
        let left = self.0.load(Ordering::SeqCst);
        if left == 0 {
            return Err(StopReason::Cancelled);
        }
        self.0.store(left - 1, Ordering::SeqCst);
        Ok(())
    }
}

fn run_five_cycles(name: &str, bytes: &[u8]) -> (RenderReport, usize) {
    let path = std::env::temp_dir().join(format!("fbbanner-log-{}-{name}", std::process::id()));
    std::fs::write(&path, bytes).unwrap();
    let mut buf = vec![0u8; 64];
    WARNINGS.0.store(0, Ordering::SeqCst);
    let report = RenderLoop::new(path, RenderMode::Repeating)
        .period(Duration::ZERO)
        .run(
            &mut Surface::new(SurfaceInfo::packed(4, 4, 32), &mut buf),
            &CancelAfter(AtomicU32::new(4)),
        )
        .unwrap();
    (report, WARNINGS.0.load(Ordering::SeqCst))
}

#[test]
fn repeated_problems_warn_once() {
    log::set_logger(&WARNINGS).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let (report, warnings) = run_five_cycles("garbage", &[0u8; 100]);
    assert_eq!(report.failed_cycles, 5);
    assert_eq!(warnings, 1);

    // 24-bit rows decode and draw, but the depth mismatch is reported once.
    let bgr = encode_bmp(2, 2, 24, &[7u8; 12], EncodeOptions::default()).unwrap();
    let (report, warnings) = run_five_cycles("bgr", &bgr);
    assert_eq!(report.failed_cycles, 0);
    assert_eq!(report.last_rows_drawn, 2);
    assert_eq!(warnings, 1);

    // Short pixel data, one notice.
    let full = encode_bmp(1, 4, 32, &[1u8; 16], EncodeOptions::default()).unwrap();
    let (report, warnings) = run_five_cycles("short", &full[..54 + 8]);
    assert_eq!(report.last_rows_drawn, 2);
    assert_eq!(warnings, 1);
}
