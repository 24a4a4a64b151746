// src/filter.rs

//! Per-pixel color filters applied by the renderer before compositing,
//! e.g. to shade a pressed widget.

use crate::color::Color;
use crate::mix::darken;
use crate::opa::Opa;

/// Transforms a color with a filter-specific strength.
pub trait ColorFilter {
    fn filter(&self, color: Color, opa: Opa) -> Color;
}

impl<F> ColorFilter for F
where
    F: Fn(Color, Opa) -> Color,
{
    #[inline]
    fn filter(&self, color: Color, opa: Opa) -> Color {
        self(color, opa)
    }
}

/// Darkens by `opa`; transparent strengths leave the color as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shade;

impl ColorFilter for Shade {
    #[inline]
    fn filter(&self, color: Color, opa: Opa) -> Color {
        if opa.is_transparent() {
            return color;
        }
        darken(color, opa)
    }
}
