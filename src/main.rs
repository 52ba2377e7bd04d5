use std::fs::File;
use std::process::ExitCode;

use fbbanner::cli::{self, Command, Options};
use fbbanner::device::Framebuffer;
use fbbanner::{CancelToken, FbError, Limits, RenderLoop, SURFACE_BITS_PER_PIXEL};

/// Largest image accepted, as a multiple of the screen size.
const IMAGE_LIMIT_FACTOR: u64 = 4;

fn main() -> ExitCode {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            cli::print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            cli::print_usage();
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = fbbanner::logger::init(options.log_level) {
        eprintln!("cannot install logger: {e}");
    }

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<(), FbError> {
    let mut fb = Framebuffer::open(&options.device)?;
    let info = fb.info();
    log::info!(
        "Res={}x{}, bpp={}",
        info.width,
        info.height,
        info.bits_per_pixel
    );
    log::debug!("{} ({}), stride {}", options.device.display(), fb.id(), info.stride);
    if info.bits_per_pixel != SURFACE_BITS_PER_PIXEL {
        return Err(FbError::UnsupportedSurfaceDepth {
            bits_per_pixel: info.bits_per_pixel,
        });
    }

    // Fail before drawing anything if the image cannot be opened at all.
    File::open(&options.image).map_err(|e| {
        FbError::Config(format!("cannot open {}: {e}", options.image.display()))
    })?;

    let token = CancelToken::new();
    fbbanner::cancel::spawn_signal_listener(token.clone())?;

    let limits = Limits::for_display(
        info.width,
        info.height,
        fb.mapped_len(),
        IMAGE_LIMIT_FACTOR,
    );
    let render = RenderLoop::new(&options.image, options.mode).limits(limits);
    log::info!("drawing {} ({:?})", options.image.display(), options.mode);
    let report = render.run(&mut fb.surface(), &token)?;
    log::debug!(
        "{} cycles, {} failed, {} rows drawn last",
        report.cycles,
        report.failed_cycles,
        report.last_rows_drawn
    );
    Ok(())
}
