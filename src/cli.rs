//! Command-line options.

use std::path::PathBuf;

use log::LevelFilter;

use crate::device::DEFAULT_DEVICE;
use crate::error::FbError;
use crate::render::RenderMode;

pub struct Options {
    /// Framebuffer device, `-f`.
    pub device: PathBuf,
    /// BMP to draw, `-b`.
    pub image: PathBuf,
    /// `-d` repeats until interrupted.
    pub mode: RenderMode,
    /// From `-q`/`-v`; `None` defers to the environment.
    pub log_level: Option<LevelFilter>,
}

pub enum Command {
    Run(Options),
    Help,
}

/// Parse arguments (without the program name), getopt style.
///
/// Option values may be attached (`-b/logo.bmp`) or follow as the next
/// argument, and flags may be grouped (`-db logo.bmp`). An unknown flag or
/// a missing option value asks for help.
pub fn parse_args<I, S>(args: I) -> Result<Command, FbError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut device = None;
    let mut image = None;
    let mut mode = RenderMode::Once;
    let mut verbose = 0u8;
    let mut quiet = false;

    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        let Some(flags) = arg.strip_prefix('-').filter(|f| !f.is_empty()) else {
            return Err(FbError::Config(format!("unexpected argument '{arg}'")));
        };
        for (i, c) in flags.char_indices() {
            match c {
                'd' => mode = RenderMode::Repeating,
                'v' => verbose = verbose.saturating_add(1),
                'q' => quiet = true,
                'f' | 'b' => {
                    let attached = &flags[i + c.len_utf8()..];
                    let value = if attached.is_empty() {
                        match args.next() {
                            Some(v) => v,
                            None => return Ok(Command::Help),
                        }
                    } else {
                        attached.to_string()
                    };
                    if c == 'f' {
                        device = Some(PathBuf::from(value));
                    } else {
                        image = Some(PathBuf::from(value));
                    }
                    break;
                }
                _ => return Ok(Command::Help),
            }
        }
    }

    let image = image
        .ok_or_else(|| FbError::Config("Error: banner image (-b) is mandatory.".into()))?;
    let log_level = match (quiet, verbose) {
        (true, _) => Some(LevelFilter::Error),
        (false, 0) => None,
        (false, 1) => Some(LevelFilter::Debug),
        (false, _) => Some(LevelFilter::Trace),
    };

    Ok(Command::Run(Options {
        device: device.unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE)),
        image,
        mode,
        log_level,
    }))
}

pub fn print_usage() {
    println!("fbbanner - draw a BMP banner on a Linux framebuffer");
    println!();
    println!("USAGE:");
    println!("    fbbanner -b <image.bmp> [-f <device>] [-d] [-v|-vv|-q]");
    println!();
    println!("OPTIONS:");
    println!("    -f <device>   framebuffer device (default: {DEFAULT_DEVICE})");
    println!("    -b <image>    banner image file (32-bit BMP)");
    println!("    -d            keep redrawing until interrupted");
    println!("    -v            debug logging (-vv for trace)");
    println!("    -q            errors only");
    println!("    -h            show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    FBBANNER_LOG  log level when neither -v nor -q is given");
}
