// src/convert.rs

//! Conversions between the color encodings and to and from HSV.
//!
//! Narrowing conversions truncate; there is no rounding or dithering.

use crate::color::{Color, Color16, Color32};
use crate::opa::Opa;
use serde::{Deserialize, Serialize};

impl Color {
    /// Packs to RGB565 by truncating each channel to its field width.
    #[inline]
    pub const fn to_u16(self) -> u16 {
        ((self.red as u16 & 0xF8) << 8) + ((self.green as u16 & 0xFC) << 3) + ((self.blue as u16) >> 3)
    }

    /// Widens to XRGB8888; the top byte is always `0xFF`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        0xFF00_0000 | (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }

    /// Attaches `opa` as the alpha channel without scaling the color.
    #[inline]
    pub const fn to_32(self, opa: Opa) -> Color32 {
        Color32::new(self.red, self.green, self.blue, opa.0)
    }

    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self.red, self.green, self.blue)
    }
}

impl From<Color> for Color16 {
    #[inline]
    fn from(c: Color) -> Self {
        Color16(c.to_u16())
    }
}

impl Color16 {
    /// Expands to RGB888 by replicating the top bits into the low bits, so
    /// full-scale channels map to 255.
    #[inline]
    pub const fn to_color(self) -> Color {
        let r = self.red();
        let g = self.green();
        let b = self.blue();
        Color::new(r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
    }
}

impl From<Color16> for Color {
    #[inline]
    fn from(c: Color16) -> Self {
        c.to_color()
    }
}

impl Color32 {
    /// Drops the alpha channel.
    #[inline]
    pub const fn to_color(self) -> Color {
        Color::new(self.red, self.green, self.blue)
    }
}

impl From<Color32> for Color {
    #[inline]
    fn from(c: Color32) -> Self {
        c.to_color()
    }
}

/// Hue in degrees (0..360), saturation and value in percent (0..=100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u16, s: u8, v: u8) -> Self {
        Hsv { h, s, v }
    }

    pub fn to_color(self) -> Color {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

#[inline]
const fn div_round(n: u32, d: u32) -> u32 {
    (n + d / 2) / d
}

/// Converts HSV to RGB888.
///
/// `h` is taken modulo 360, `s` and `v` saturate at 100. Converting the
/// result back with [`rgb_to_hsv`] lands within one unit of the input per
/// component (hue compared on the circle) once `s` and `v` are both at least
/// 30; below that, 8-bit channels cannot resolve every hue and saturation.
pub fn hsv_to_rgb(h: u16, s: u8, v: u8) -> Color {
    let h = (h % 360) as u32;
    let s = s.min(100) as u32;
    let v = v.min(100) as u32;

    let max = div_round(v * 255, 100);
    let chroma = div_round(v * s * 255, 10_000);
    let min = max - chroma;

    let f = h % 60;
    let rising = min + div_round(chroma * f, 60);
    let falling = min + div_round(chroma * (60 - f), 60);

    let (r, g, b) = match h / 60 {
        0 => (max, rising, min),
        1 => (falling, max, min),
        2 => (min, max, rising),
        3 => (min, falling, max),
        4 => (rising, min, max),
        _ => (max, min, falling),
    };
    Color::new(r as u8, g as u8, b as u8)
}

/// Converts 8-bit RGB to HSV.
///
/// Greys (no chroma) report hue and saturation 0; black also reports value 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let v = div_round(max * 100, 255) as u8;
    if chroma == 0 {
        return Hsv::new(0, 0, v);
    }
    let s = div_round(chroma * 100, max) as u8;

    // Offset of the hue from the sector's primary, signed by direction.
    let towards = |from: u32, to: u32| -> i32 {
        if from >= to {
            div_round(60 * (from - to), chroma) as i32
        } else {
            -(div_round(60 * (to - from), chroma) as i32)
        }
    };
    let h = if max == r {
        towards(g, b)
    } else if max == g {
        120 + towards(b, r)
    } else {
        240 + towards(r, g)
    };
    Hsv::new(h.rem_euclid(360) as u16, s, v)
}
