// src/format.rs

//! Static metadata for every recognized pixel format.
//!
//! Tags keep their historical numeric values so they can travel through
//! image headers and driver interfaces as a plain `u8`. Queries on raw tags
//! never fail: an unrecognized tag reports a bit depth of 0 and `false` for
//! every predicate.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Classification flags attached to each format tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FormatFlags: u8 {
        /// The stored pixel carries a transparency component.
        const ALPHA      = 1 << 0;
        /// The stored value is a palette index.
        const INDEXED    = 1 << 1;
        /// The stored value is coverage only, without color.
        const ALPHA_ONLY = 1 << 2;
    }
}

/// A pixel format tag.
///
/// The "native" formats are not variants; they depend on the configured
/// color depth and are resolved by [`crate::ColorContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorFormat {
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown = 0x00,

    #[serde(rename = "RAW")]
    Raw = 0x01,
    #[serde(rename = "RAW_ALPHA")]
    RawAlpha = 0x02,

    // <= 1 byte (+alpha) formats
    #[serde(rename = "L8")]
    L8 = 0x06,
    #[serde(rename = "I1")]
    I1 = 0x07,
    #[serde(rename = "I2")]
    I2 = 0x08,
    #[serde(rename = "I4")]
    I4 = 0x09,
    #[serde(rename = "I8")]
    I8 = 0x0A,
    #[serde(rename = "A1")]
    A1 = 0x0B,
    #[serde(rename = "A2")]
    A2 = 0x0C,
    #[serde(rename = "A4")]
    A4 = 0x0D,
    #[serde(rename = "A8")]
    A8 = 0x0E,

    // 3 byte (+alpha) formats
    #[serde(rename = "RGB888")]
    Rgb888 = 0x0F,
    #[serde(rename = "ARGB8888")]
    Argb8888 = 0x10,
    #[serde(rename = "XRGB8888")]
    Xrgb8888 = 0x11,

    // 2 byte (+alpha) formats
    #[serde(rename = "RGB565")]
    Rgb565 = 0x12,
    /// RGB565 color plane followed by an A8 alpha plane.
    #[serde(rename = "RGB565A8")]
    Rgb565A8 = 0x14,
}

/// Every defined tag, in tag order.
pub const ALL_FORMATS: [ColorFormat; 17] = [
    ColorFormat::Unknown,
    ColorFormat::Raw,
    ColorFormat::RawAlpha,
    ColorFormat::L8,
    ColorFormat::I1,
    ColorFormat::I2,
    ColorFormat::I4,
    ColorFormat::I8,
    ColorFormat::A1,
    ColorFormat::A2,
    ColorFormat::A4,
    ColorFormat::A8,
    ColorFormat::Rgb888,
    ColorFormat::Argb8888,
    ColorFormat::Xrgb8888,
    ColorFormat::Rgb565,
    ColorFormat::Rgb565A8,
];

/// Bits per pixel and classification of one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatInfo {
    pub bpp: u8,
    pub flags: FormatFlags,
}

impl FormatInfo {
    /// What every query reports for a tag outside the registry.
    pub const UNKNOWN: FormatInfo = FormatInfo {
        bpp: 0,
        flags: FormatFlags::empty(),
    };

    const fn new(bpp: u8, flags: FormatFlags) -> Self {
        FormatInfo { bpp, flags }
    }

    /// Pixel size in bytes, rounded up.
    #[inline]
    pub const fn size(self) -> u8 {
        (self.bpp + 7) >> 3
    }
}

/// A tag that is not in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownFormat(pub u8);

impl fmt::Display for UnknownFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color format tag 0x{:02X}", self.0)
    }
}

impl std::error::Error for UnknownFormat {}

impl TryFrom<u8> for ColorFormat {
    type Error = UnknownFormat;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        ALL_FORMATS
            .iter()
            .copied()
            .find(|cf| *cf as u8 == tag)
            .ok_or(UnknownFormat(tag))
    }
}

impl From<ColorFormat> for u8 {
    #[inline]
    fn from(cf: ColorFormat) -> u8 {
        cf as u8
    }
}

impl ColorFormat {
    /// The registry entry for this format.
    pub const fn info(self) -> FormatInfo {
        use ColorFormat::*;
        const A: FormatFlags = FormatFlags::ALPHA;
        const IDX: FormatFlags = FormatFlags::INDEXED;
        const A_ONLY: FormatFlags = FormatFlags::ALPHA.union(FormatFlags::ALPHA_ONLY);
        match self {
            Unknown | Raw => FormatInfo::new(0, FormatFlags::empty()),
            RawAlpha => FormatInfo::new(0, A),
            L8 => FormatInfo::new(8, FormatFlags::empty()),
            I1 => FormatInfo::new(1, IDX),
            I2 => FormatInfo::new(2, IDX),
            I4 => FormatInfo::new(4, IDX),
            I8 => FormatInfo::new(8, IDX),
            A1 => FormatInfo::new(1, A_ONLY),
            A2 => FormatInfo::new(2, A_ONLY),
            A4 => FormatInfo::new(4, A_ONLY),
            A8 => FormatInfo::new(8, A_ONLY),
            Rgb888 => FormatInfo::new(24, FormatFlags::empty()),
            Argb8888 => FormatInfo::new(32, A),
            Xrgb8888 => FormatInfo::new(32, FormatFlags::empty()),
            Rgb565 => FormatInfo::new(16, FormatFlags::empty()),
            Rgb565A8 => FormatInfo::new(16, A),
        }
    }

    /// Bits per pixel. 0 for `Unknown`, `Raw` and `RawAlpha`.
    #[inline]
    pub const fn bpp(self) -> u8 {
        self.info().bpp
    }

    /// Bytes per pixel: `ceil(bpp / 8)`.
    #[inline]
    pub const fn size(self) -> u8 {
        self.info().size()
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        self.info().flags.contains(FormatFlags::ALPHA)
    }

    #[inline]
    pub const fn is_alpha_only(self) -> bool {
        is_alpha_only_tag(self as u8)
    }

    #[inline]
    pub const fn is_indexed(self) -> bool {
        is_indexed_tag(self as u8)
    }

    /// Number of palette entries an indexed format addresses, 0 otherwise.
    pub const fn palette_size(self) -> u16 {
        match self {
            ColorFormat::I1 => 2,
            ColorFormat::I2 => 4,
            ColorFormat::I4 => 16,
            ColorFormat::I8 => 256,
            _ => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        use ColorFormat::*;
        match self {
            Unknown => "UNKNOWN",
            Raw => "RAW",
            RawAlpha => "RAW_ALPHA",
            L8 => "L8",
            I1 => "I1",
            I2 => "I2",
            I4 => "I4",
            I8 => "I8",
            A1 => "A1",
            A2 => "A2",
            A4 => "A4",
            A8 => "A8",
            Rgb888 => "RGB888",
            Argb8888 => "ARGB8888",
            Xrgb8888 => "XRGB8888",
            Rgb565 => "RGB565",
            Rgb565A8 => "RGB565A8",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Alpha-only and indexed tags each occupy one contiguous block.
const fn is_alpha_only_tag(tag: u8) -> bool {
    tag >= ColorFormat::A1 as u8 && tag <= ColorFormat::A8 as u8
}

const fn is_indexed_tag(tag: u8) -> bool {
    tag >= ColorFormat::I1 as u8 && tag <= ColorFormat::I8 as u8
}

/// Registry entry for a raw tag; [`FormatInfo::UNKNOWN`] if unrecognized.
pub fn info_of_raw(tag: u8) -> FormatInfo {
    ColorFormat::try_from(tag).map_or(FormatInfo::UNKNOWN, ColorFormat::info)
}

/// Bits per pixel of a raw tag, 0 if unrecognized.
pub fn bpp_of_raw(tag: u8) -> u8 {
    info_of_raw(tag).bpp
}

/// Bytes per pixel of a raw tag, 0 if unrecognized.
pub fn size_of_raw(tag: u8) -> u8 {
    info_of_raw(tag).size()
}

pub fn has_alpha_raw(tag: u8) -> bool {
    info_of_raw(tag).flags.contains(FormatFlags::ALPHA)
}

pub fn is_alpha_only_raw(tag: u8) -> bool {
    is_alpha_only_tag(tag)
}

pub fn is_indexed_raw(tag: u8) -> bool {
    is_indexed_tag(tag)
}

/// Palette size of a raw tag, 0 for anything that is not indexed.
pub fn palette_size_of_raw(tag: u8) -> u16 {
    ColorFormat::try_from(tag).map_or(0, ColorFormat::palette_size)
}
