// src/mix.rs

//! Opacity-weighted color mixing.
//!
//! RGB565 mixing reduces the 8-bit weight to a 5-bit multiplier
//! `m = (mix + 4) >> 3` and blends all three channels with one 32-bit
//! multiply: the color is copied into both halves of a `u32` and masked with
//! [`NEUTRAL_MASK`] so that red, green and blue sit in lanes separated by
//! enough zero bits that a channel times 32 never carries into its
//! neighbour. Two implementations are provided behind [`Mixer16`]:
//!
//! - [`PackedMixer`] uses a general multiply on the lane-spread difference.
//! - [`ShiftAddMixer`] has one case per multiplier and builds both products
//!   from shifts and adds, for targets without a fast multiplier.
//!
//! Both produce identical results for every input.

use crate::color::{Color, Color16, Color32};
use crate::opa::Opa;
use serde::{Deserialize, Serialize};

/// Lane mask for a RGB565 color spread over a `u32`.
///
/// Blue lands in bits 0..5, red in bits 11..16 and green (from the upper copy)
/// in bits 21..27.
pub const NEUTRAL_MASK: u32 = 0x07E0_F81F;

/// Reduces an 8-bit weight to the 0..=32 multiplier used by RGB565 mixing.
#[inline(always)]
pub const fn multiplier(mix: Opa) -> u32 {
    (mix.0 as u32 + 4) >> 3
}

#[inline(always)]
fn fold(lanes: u32) -> u16 {
    let lanes = lanes & NEUTRAL_MASK;
    (lanes >> 16) as u16 | lanes as u16
}

/// Mixes two RGB565 colors.
pub trait Mixer16 {
    /// Returns `c1` for `mix == 255`, `c2` for `mix == 0`, and a per-channel
    /// linear blend in between (`c1` weighted by `mix`).
    fn mix16(&self, c1: Color16, c2: Color16, mix: Opa) -> Color16;
}

/// General-multiply RGB565 mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedMixer;

impl Mixer16 for PackedMixer {
    #[inline]
    fn mix16(&self, c1: Color16, c2: Color16, mix: Opa) -> Color16 {
        Color16(mix16_packed(c1.0, c2.0, mix))
    }
}

/// Computes `bg + ((fg - bg) * m >> 5)` on lane-spread colors.
#[inline]
pub fn mix16_packed(c1: u16, c2: u16, mix: Opa) -> u16 {
    if mix == Opa::COVER {
        return c1;
    }
    if mix == Opa::TRANSP {
        return c2;
    }
    match multiplier(mix) {
        0 => c2,
        32 => c1,
        m => {
            let bg = (c2 as u32 | (c2 as u32) << 16) & NEUTRAL_MASK;
            let fg = (c1 as u32 | (c1 as u32) << 16) & NEUTRAL_MASK;
            // The difference may borrow across lanes; the borrows only reach
            // bits that the final mask clears.
            let result = (fg.wrapping_sub(bg).wrapping_mul(m) >> 5).wrapping_add(bg);
            fold(result)
        }
    }
}

/// Shift-and-add RGB565 mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftAddMixer;

impl Mixer16 for ShiftAddMixer {
    #[inline]
    fn mix16(&self, c1: Color16, c2: Color16, mix: Opa) -> Color16 {
        Color16(mix16_shift_add(c1.0, c2.0, mix))
    }
}

/// Spreads `c << k` over the lanes of [`NEUTRAL_MASK`] `<< k`, which
/// multiplies every channel by `2^k` for free.
#[inline(always)]
fn spread(c: u16, k: u32) -> u32 {
    let v = (c as u32) << k;
    (v | v << 16) & (NEUTRAL_MASK << k)
}

/// Computes `(fg * m + bg * (32 - m)) >> 5` with one shift/add sequence per
/// multiplier.
#[inline]
pub fn mix16_shift_add(c1: u16, c2: u16, mix: Opa) -> u16 {
    let (fg, bg) = match multiplier(mix) {
        0 => return c2,
        1 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f, (b << 5) - b) // x1, x31
        }
        2 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            (f, (b << 4) - b) // x2, x30
        }
        3 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 1), (b << 5) - (b << 1) - b) // x3, x29
        }
        4 => {
            let f = spread(c1, 2);
            let b = spread(c2, 2);
            (f, (b << 3) - b) // x4, x28
        }
        5 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 2), (b << 5) - (b << 2) - b) // x5, x27
        }
        6 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            (f + (f << 1), b + (b << 2) + (b << 3)) // x6, x26
        }
        7 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            ((f << 3) - f, b + (b << 3) + (b << 4)) // x7, x25
        }
        8 => {
            let f = spread(c1, 3);
            let b = spread(c2, 3);
            (f, b + (b << 1)) // x8, x24
        }
        9 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 3), (b << 4) + (b << 3) - b) // x9, x23
        }
        10 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            (f + (f << 2), b + (b << 1) + (b << 3)) // x10, x22
        }
        11 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 1) + (f << 3), b + (b << 2) + (b << 4)) // x11, x21
        }
        12 => {
            let f = spread(c1, 2);
            let b = spread(c2, 2);
            (f + (f << 1), b + (b << 2)) // x12, x20
        }
        13 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 2) + (f << 3), b + (b << 1) + (b << 4)) // x13, x19
        }
        14 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            ((f << 3) - f, b + (b << 3)) // x14, x18
        }
        15 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            ((f << 4) - f, b + (b << 4)) // x15, x17
        }
        16 => {
            let f = spread(c1, 4);
            let b = spread(c2, 4);
            (f, b) // x16, x16
        }
        17 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 4), (b << 4) - b) // x17, x15
        }
        18 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            (f + (f << 3), (b << 3) - b) // x18, x14
        }
        19 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 1) + (f << 4), b + (b << 2) + (b << 3)) // x19, x13
        }
        20 => {
            let f = spread(c1, 2);
            let b = spread(c2, 2);
            (f + (f << 2), b + (b << 1)) // x20, x12
        }
        21 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 2) + (f << 4), b + (b << 1) + (b << 3)) // x21, x11
        }
        22 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            (f + (f << 1) + (f << 3), b + (b << 2)) // x22, x10
        }
        23 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            ((f << 4) + (f << 3) - f, b + (b << 3)) // x23, x9
        }
        24 => {
            let f = spread(c1, 3);
            let b = spread(c2, 3);
            (f + (f << 1), b) // x24, x8
        }
        25 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            (f + (f << 3) + (f << 4), (b << 3) - b) // x25, x7
        }
        26 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            (f + (f << 2) + (f << 3), b + (b << 1)) // x26, x6
        }
        27 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            ((f << 5) - (f << 2) - f, b + (b << 2)) // x27, x5
        }
        28 => {
            let f = spread(c1, 2);
            let b = spread(c2, 2);
            ((f << 3) - f, b) // x28, x4
        }
        29 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            ((f << 5) - (f << 1) - f, b + (b << 1)) // x29, x3
        }
        30 => {
            let f = spread(c1, 1);
            let b = spread(c2, 1);
            ((f << 4) - f, b) // x30, x2
        }
        31 => {
            let f = spread(c1, 0);
            let b = spread(c2, 0);
            ((f << 5) - f, b) // x31, x1
        }
        _ => return c1,
    };
    fold((fg + bg) >> 5)
}

/// Selects the RGB565 mixing implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixStrategy {
    #[default]
    Packed,
    ShiftAdd,
}

impl Mixer16 for MixStrategy {
    #[inline]
    fn mix16(&self, c1: Color16, c2: Color16, mix: Opa) -> Color16 {
        match self {
            MixStrategy::Packed => PackedMixer.mix16(c1, c2, mix),
            MixStrategy::ShiftAdd => ShiftAddMixer.mix16(c1, c2, mix),
        }
    }
}

/// Mixes two RGB565 colors with [`PackedMixer`].
#[inline]
pub fn mix16(c1: Color16, c2: Color16, mix: Opa) -> Color16 {
    PackedMixer.mix16(c1, c2, mix)
}

// x / 255 for x <= 255 * 255.
#[inline(always)]
const fn udiv255(x: u32) -> u32 {
    (x * 0x8081) >> 23
}

#[inline(always)]
const fn mix_channel(a: u8, b: u8, mix: u32) -> u8 {
    udiv255(a as u32 * mix + b as u32 * (255 - mix)) as u8
}

/// Mixes two RGB888 colors channel by channel; `c1` is weighted by `amount`.
///
/// `amount == 255` gives `c1` and `amount == 0` gives `c2` exactly.
#[inline]
pub const fn mix(c1: Color, c2: Color, amount: Opa) -> Color {
    let m = amount.0 as u32;
    Color::new(
        mix_channel(c1.red, c2.red, m),
        mix_channel(c1.green, c2.green, m),
        mix_channel(c1.blue, c2.blue, m),
    )
}

/// Mixes white into `c`: `lvl == 0` leaves it unchanged, 255 gives white.
#[inline]
pub const fn lighten(c: Color, lvl: Opa) -> Color {
    mix(Color::WHITE, c, lvl)
}

/// Mixes black into `c`: `lvl == 0` leaves it unchanged, 255 gives black.
#[inline]
pub const fn darken(c: Color, lvl: Opa) -> Color {
    mix(Color::BLACK, c, lvl)
}

/// Blends `fg` over `bg` using `fg.alpha` as the weight.
///
/// Nearly opaque foregrounds replace the color but keep `bg`'s alpha;
/// nearly transparent ones return `bg` untouched.
pub fn mix32(fg: Color32, bg: Color32) -> Color32 {
    let a = Opa(fg.alpha);
    if a >= Opa::MAX {
        return Color32 { alpha: bg.alpha, ..fg };
    }
    if a <= Opa::MIN {
        return bg;
    }
    let a = a.0 as u32;
    let blend = |f: u8, b: u8| ((f as u32 * a + b as u32 * (255 - a)) >> 8) as u8;
    Color32 {
        red: blend(fg.red, bg.red),
        green: blend(fg.green, bg.green),
        blue: blend(fg.blue, bg.blue),
        alpha: bg.alpha,
    }
}

/// Perceived brightness, `(3r + g + 4b) / 8`.
#[inline]
pub const fn brightness(c: Color) -> u8 {
    ((3 * c.red as u16 + c.green as u16 + 4 * c.blue as u16) >> 3) as u8
}

/// Luma with Rec. 601 weights in 8-bit fixed point.
#[inline]
pub const fn luminance(c: Color) -> u8 {
    ((77 * c.red as u32 + 151 * c.green as u32 + 28 * c.blue as u32) >> 8) as u8
}
