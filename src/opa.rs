// src/opa.rs

//! The 8-bit opacity scale used as a blend weight.
//!
//! `Opa` is a mix weight, not a per-pixel alpha channel, even though both
//! range over `0..=255`. The named percentage levels are fixed literals and
//! are deliberately not multiples of 25.5.

use serde::{Deserialize, Serialize};

/// An opacity (mix weight) in `0..=255`.
///
/// `0` is fully transparent and `255` fully covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Opa(pub u8);

impl Opa {
    pub const TRANSP: Opa = Opa(0);
    pub const P0: Opa = Opa(0);
    pub const P10: Opa = Opa(25);
    pub const P20: Opa = Opa(51);
    pub const P30: Opa = Opa(76);
    pub const P40: Opa = Opa(102);
    pub const P50: Opa = Opa(127);
    pub const P60: Opa = Opa(153);
    pub const P70: Opa = Opa(178);
    pub const P80: Opa = Opa(204);
    pub const P90: Opa = Opa(229);
    pub const P100: Opa = Opa(255);
    pub const COVER: Opa = Opa(255);

    /// Opacities below this are treated as fully transparent by fast paths.
    pub const MIN: Opa = Opa(2);
    /// Opacities above this are treated as fully covering by fast paths.
    pub const MAX: Opa = Opa(253);

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Below [`Opa::MIN`].
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.0 < Self::MIN.0
    }

    /// Above [`Opa::MAX`].
    #[inline]
    pub const fn is_cover(self) -> bool {
        self.0 > Self::MAX.0
    }

    /// Combines two opacities: `a * b >> 8`.
    ///
    /// The shift makes `COVER * COVER` land on 254, not 255.
    #[inline]
    pub const fn mix2(a: Opa, b: Opa) -> Opa {
        Opa(((a.0 as u32 * b.0 as u32) >> 8) as u8)
    }

    /// Combines three opacities: `a * b * c >> 16`.
    #[inline]
    pub const fn mix3(a: Opa, b: Opa, c: Opa) -> Opa {
        Opa(((a.0 as u32 * b.0 as u32 * c.0 as u32) >> 16) as u8)
    }
}

impl From<u8> for Opa {
    #[inline]
    fn from(v: u8) -> Self {
        Opa(v)
    }
}

impl From<Opa> for u8 {
    #[inline]
    fn from(opa: Opa) -> u8 {
        opa.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_levels_match_the_compatibility_table() {
        let table = [
            (Opa::P0, 0),
            (Opa::P10, 25),
            (Opa::P20, 51),
            (Opa::P30, 76),
            (Opa::P40, 102),
            (Opa::P50, 127),
            (Opa::P60, 153),
            (Opa::P70, 178),
            (Opa::P80, 204),
            (Opa::P90, 229),
            (Opa::P100, 255),
        ];
        for (opa, expected) in table {
            assert_eq!(opa.get(), expected);
        }
        assert_eq!(Opa::TRANSP, Opa::P0);
        assert_eq!(Opa::COVER, Opa::P100);
    }

    #[test]
    fn thresholds() {
        assert!(Opa(0).is_transparent());
        assert!(Opa(1).is_transparent());
        assert!(!Opa(2).is_transparent());
        assert!(!Opa(253).is_cover());
        assert!(Opa(254).is_cover());
        assert!(Opa::COVER.is_cover());
    }

    #[test]
    fn opacity_products() {
        assert_eq!(Opa::mix2(Opa::COVER, Opa::COVER), Opa(254));
        assert_eq!(Opa::mix2(Opa(128), Opa(128)), Opa(64));
        assert_eq!(Opa::mix2(Opa::TRANSP, Opa::COVER), Opa::TRANSP);
        // 255^3 >> 16 = 253
        assert_eq!(Opa::mix3(Opa::COVER, Opa::COVER, Opa::COVER), Opa(253));
        assert_eq!(Opa::mix3(Opa(128), Opa(128), Opa(128)), Opa(32));
    }
}
