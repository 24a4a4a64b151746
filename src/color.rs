// src/color.rs

//! Color value types: RGB888 [`Color`], packed RGB565 [`Color16`] and
//! ARGB8888 [`Color32`].
//!
//! Builders never validate. Channel values are stored at their fixed width,
//! so anything wider wraps or truncates.

use serde::{Deserialize, Serialize};

/// An RGB888 color.
///
/// Byte order in memory is blue, green, red, matching the native RGB888
/// framebuffer layout.
#[derive(Debug, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Color {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { blue, green, red }
    }

    /// Creates a color from `0xRRGGBB`. Bits above 24 are ignored.
    #[inline]
    pub const fn hex(c: u32) -> Self {
        Color::new((c >> 16) as u8, (c >> 8) as u8, c as u8)
    }

    /// Creates a color from a short `0xRGB` literal by duplicating each
    /// nibble, so `0x123` becomes `0x112233`.
    #[inline]
    pub const fn hex3(c: u32) -> Self {
        let r = ((c >> 8) & 0xF) as u8;
        let g = ((c >> 4) & 0xF) as u8;
        let b = (c & 0xF) as u8;
        Color::new(r << 4 | r, g << 4 | g, b << 4 | b)
    }

    /// The color as `0x00RRGGBB`.
    #[inline]
    pub const fn to_int(self) -> u32 {
        self.blue as u32 | (self.green as u32) << 8 | (self.red as u32) << 16
    }
}

impl PartialEq for Color {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_int() == other.to_int()
    }
}

impl Eq for Color {}

/// A packed RGB565 color.
///
/// Bits 0..5 hold blue, 5..11 green and 11..16 red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Color16(pub u16);

const RED_SHIFT: u16 = 11;
const GREEN_SHIFT: u16 = 5;
const RED_MASK: u16 = 0x1F;
const GREEN_MASK: u16 = 0x3F;
const BLUE_MASK: u16 = 0x1F;

impl Color16 {
    /// Packs 5-bit red, 6-bit green and 5-bit blue channels. Extra bits are
    /// masked off.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Color16(
            (red as u16 & RED_MASK) << RED_SHIFT
                | (green as u16 & GREEN_MASK) << GREEN_SHIFT
                | (blue as u16 & BLUE_MASK),
        )
    }

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Color16(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// 5-bit red channel.
    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 >> RED_SHIFT) & RED_MASK) as u8
    }

    /// 6-bit green channel.
    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & GREEN_MASK) as u8
    }

    /// 5-bit blue channel.
    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & BLUE_MASK) as u8
    }
}

impl From<u16> for Color16 {
    #[inline]
    fn from(bits: u16) -> Self {
        Color16(bits)
    }
}

impl From<Color16> for u16 {
    #[inline]
    fn from(c: Color16) -> u16 {
        c.0
    }
}

/// An ARGB8888 color: bytes blue, green, red, alpha in memory.
///
/// `alpha` is the pixel's own transparency, independent of any mix weight.
#[derive(Debug, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Color32 {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub alpha: u8,
}

impl Color32 {
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Color32 {
            blue,
            green,
            red,
            alpha,
        }
    }

    /// The color as `0xAARRGGBB`, identical to its little-endian memory image.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        u32::from_le_bytes([self.blue, self.green, self.red, self.alpha])
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        let [blue, green, red, alpha] = bits.to_le_bytes();
        Color32 {
            blue,
            green,
            red,
            alpha,
        }
    }
}

impl PartialEq for Color32 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for Color32 {}
