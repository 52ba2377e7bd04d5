//! Linux fbdev access: geometry queries and a shared read/write mapping.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::Path;
use std::ptr::{self, NonNull};

use crate::error::FbError;
use crate::surface::{Surface, SurfaceInfo};

/// Device opened when no `-f` option is given.
pub const DEFAULT_DEVICE: &str = "/dev/fb0";

const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

#[allow(dead_code)]
#[derive(Clone, Copy, Debug, Default)]
#[repr(C)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

/// `struct fb_var_screeninfo` from `<linux/fb.h>`.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, Default)]
#[repr(C)]
struct FbVarScreenInfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// `struct fb_fix_screeninfo` from `<linux/fb.h>`.
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, Default)]
#[repr(C)]
struct FbFixScreenInfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    type_: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

/// An open framebuffer device with its memory mapped into the process.
///
/// The mapping is released on drop, then the device file is closed.
#[derive(Debug)]
pub struct Framebuffer {
    map: NonNull<u8>,
    len: usize,
    var: FbVarScreenInfo,
    fix: FbFixScreenInfo,
    _file: File,
}

impl Framebuffer {
    /// Open `path`, read its screen information and map its memory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FbError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path.as_ref())
            .map_err(|source| FbError::Device {
                context: "cannot open framebuffer device",
                source,
            })?;
        let fd = file.as_raw_fd();

        let mut var = FbVarScreenInfo::default();
        // SAFETY: FBIOGET_VSCREENINFO fills a `fb_var_screeninfo`, which
        // `FbVarScreenInfo` mirrors field for field.
        if unsafe { libc::ioctl(fd, FBIOGET_VSCREENINFO as _, &mut var) } != 0 {
            return Err(FbError::device("error reading variable information"));
        }

        let mut fix = FbFixScreenInfo::default();
        // SAFETY: as above, for `fb_fix_screeninfo`.
        if unsafe { libc::ioctl(fd, FBIOGET_FSCREENINFO as _, &mut fix) } != 0 {
            return Err(FbError::device("error reading fixed information"));
        }

        let len = fix.smem_len as usize;
        if len == 0 {
            return Err(FbError::Device {
                context: "framebuffer reports no video memory",
                source: std::io::ErrorKind::InvalidData.into(),
            });
        }

        // SAFETY: mapping a device fd we own; the result is checked below.
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                fd,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            return Err(FbError::device("cannot map framebuffer memory"));
        }
        let map = NonNull::new(ptr.cast::<u8>())
            .ok_or_else(|| FbError::device("cannot map framebuffer memory"))?;

        log::debug!(
            "{}: id {:?}, virtual {}x{}, {} bytes mapped",
            path.as_ref().display(),
            id_string(&fix.id),
            var.xres_virtual,
            var.yres_virtual,
            len
        );

        Ok(Self {
            map,
            len,
            var,
            fix,
            _file: file,
        })
    }

    pub fn info(&self) -> SurfaceInfo {
        SurfaceInfo {
            width: self.var.xres,
            height: self.var.yres,
            bits_per_pixel: self.var.bits_per_pixel,
            stride: self.fix.line_length as usize,
            x_offset: self.var.xoffset,
            y_offset: self.var.yoffset,
        }
    }

    /// Driver identification string.
    pub fn id(&self) -> String {
        id_string(&self.fix.id)
    }

    pub fn mapped_len(&self) -> usize {
        self.len
    }

    /// The mapped memory as a drawable surface.
    pub fn surface(&mut self) -> Surface<'_> {
        // SAFETY: `map` points to `len` bytes mapped read/write and kept
        // alive until drop; `&mut self` makes this the only live view.
        let buf = unsafe { std::slice::from_raw_parts_mut(self.map.as_ptr(), self.len) };
        Surface::new(self.info(), buf)
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        // SAFETY: `map`/`len` are exactly what mmap returned and no surface
        // borrowing them can outlive `self`.
        unsafe { libc::munmap(self.map.as_ptr().cast(), self.len) };
    }
}

fn id_string(id: &[u8; 16]) -> String {
    let end = id.iter().position(|&b| b == 0).unwrap_or(id.len());
    String::from_utf8_lossy(&id[..end]).into_owned()
}
