//! On-disk BMP header structures.
//!
//! Every multi-byte field is little-endian and the structures are packed
//! with no padding, so each type converts to and from a fixed-size byte
//! array rather than being read through a `repr(C)` struct.

/// `"BM"` read as a little-endian `u16`.
pub const BMP_MAGIC: u16 = 0x4D42;

/// `InfoHeader::size` value announcing a trailing [`V4Extension`].
pub const V4_INFO_HEADER_SIZE: u32 = 108;

fn u16_at(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn u32_at(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn put_u16(b: &mut [u8], at: usize, v: u16) {
    b[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_u32(b: &mut [u8], at: usize, v: u32) {
    b[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

/// The 14-byte header at the start of every BMP file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Must be [`BMP_MAGIC`].
    pub magic: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset of the first scanline from the start of the file.
    pub pixel_data_offset: u32,
}

impl FileHeader {
    pub const SIZE: usize = 14;

    pub fn from_le_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            magic: u16_at(b, 0),
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            pixel_data_offset: u32_at(b, 10),
        }
    }

    pub fn to_le_bytes(&self) -> [u8; Self::SIZE] {
        let mut b = [0u8; Self::SIZE];
        put_u16(&mut b, 0, self.magic);
        put_u32(&mut b, 2, self.file_size);
        put_u16(&mut b, 6, self.reserved1);
        put_u16(&mut b, 8, self.reserved2);
        put_u32(&mut b, 10, self.pixel_data_offset);
        b
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == BMP_MAGIC
    }
}

/// The 40-byte `BITMAPINFOHEADER` following the file header.
///
/// Width and height are unsigned: top-down (negative height) bitmaps are
/// not supported and decode as enormous bottom-up images, which the
/// decoder's [`Limits`](crate::Limits) reject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfoHeader {
    /// Declared header size. 40 for the plain header, 108 for V4.
    pub size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    /// Assumed to be 0 (`BI_RGB`); not enforced.
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    pub const SIZE: usize = 40;

    pub fn from_le_bytes(b: &[u8; Self::SIZE]) -> Self {
        Self {
            size: u32_at(b, 0),
            width: u32_at(b, 4),
            height: u32_at(b, 8),
            planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_size: u32_at(b, 20),
            x_pixels_per_meter: u32_at(b, 24),
            y_pixels_per_meter: u32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_le_bytes(&self) -> [u8; Self::SIZE] {
        let mut b = [0u8; Self::SIZE];
        put_u32(&mut b, 0, self.size);
        put_u32(&mut b, 4, self.width);
        put_u32(&mut b, 8, self.height);
        put_u16(&mut b, 12, self.planes);
        put_u16(&mut b, 14, self.bits_per_pixel);
        put_u32(&mut b, 16, self.compression);
        put_u32(&mut b, 20, self.image_size);
        put_u32(&mut b, 24, self.x_pixels_per_meter);
        put_u32(&mut b, 28, self.y_pixels_per_meter);
        put_u32(&mut b, 32, self.colors_used);
        put_u32(&mut b, 36, self.colors_important);
        b
    }

    pub fn has_v4_extension(&self) -> bool {
        self.size == V4_INFO_HEADER_SIZE
    }
}

/// The 68 bytes a `BITMAPV4HEADER` adds after the 40-byte info header.
///
/// Parsed for completeness; the decoder skips over it and never applies the
/// masks or calibration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct V4Extension {
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space_type: u32,
    /// Red, green and blue endpoints, each as X, Y, Z (2.30 fixed point).
    pub endpoints: [u32; 9],
    pub gamma_red: u32,
    pub gamma_green: u32,
    pub gamma_blue: u32,
}

impl V4Extension {
    pub const SIZE: usize = 68;

    pub fn from_le_bytes(b: &[u8; Self::SIZE]) -> Self {
        let mut endpoints = [0u32; 9];
        for (i, e) in endpoints.iter_mut().enumerate() {
            *e = u32_at(b, 20 + i * 4);
        }
        Self {
            red_mask: u32_at(b, 0),
            green_mask: u32_at(b, 4),
            blue_mask: u32_at(b, 8),
            alpha_mask: u32_at(b, 12),
            color_space_type: u32_at(b, 16),
            endpoints,
            gamma_red: u32_at(b, 56),
            gamma_green: u32_at(b, 60),
            gamma_blue: u32_at(b, 64),
        }
    }

    pub fn to_le_bytes(&self) -> [u8; Self::SIZE] {
        let mut b = [0u8; Self::SIZE];
        put_u32(&mut b, 0, self.red_mask);
        put_u32(&mut b, 4, self.green_mask);
        put_u32(&mut b, 8, self.blue_mask);
        put_u32(&mut b, 12, self.alpha_mask);
        put_u32(&mut b, 16, self.color_space_type);
        for (i, e) in self.endpoints.iter().enumerate() {
            put_u32(&mut b, 20 + i * 4, *e);
        }
        put_u32(&mut b, 56, self.gamma_red);
        put_u32(&mut b, 60, self.gamma_green);
        put_u32(&mut b, 64, self.gamma_blue);
        b
    }
}
