// src/pixel.rs
//! Pixel trait for per-format encode and decode of a single pixel.

use crate::color::{Color, Color16, Color32};
use crate::format::ColorFormat;
use core::fmt::Debug;

/// A value type that is stored in a framebuffer in one fixed format.
///
/// Byte images are little-endian, matching the in-memory layout of the
/// corresponding [`ColorFormat`].
pub trait Pixel: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// The format this pixel is stored in.
    const FORMAT: ColorFormat;

    /// Bytes occupied by one pixel.
    const SIZE: usize = Self::FORMAT.size() as usize;

    fn from_color(c: Color) -> Self;

    fn to_color(self) -> Color;

    /// Writes the pixel to the front of `dst`. Returns `None` if `dst` is
    /// shorter than [`Pixel::SIZE`].
    fn write_le(self, dst: &mut [u8]) -> Option<usize>;

    /// Reads a pixel from the front of `src`.
    fn read_le(src: &[u8]) -> Option<Self>;
}

impl Pixel for Color16 {
    const FORMAT: ColorFormat = ColorFormat::Rgb565;

    #[inline(always)]
    fn from_color(c: Color) -> Self {
        Color16::from(c)
    }
    #[inline(always)]
    fn to_color(self) -> Color {
        Color16::to_color(self)
    }
    #[inline]
    fn write_le(self, dst: &mut [u8]) -> Option<usize> {
        dst.get_mut(..2)?.copy_from_slice(&self.0.to_le_bytes());
        Some(2)
    }
    #[inline]
    fn read_le(src: &[u8]) -> Option<Self> {
        let bytes = src.get(..2)?;
        Some(Color16(u16::from_le_bytes([bytes[0], bytes[1]])))
    }
}

impl Pixel for Color {
    const FORMAT: ColorFormat = ColorFormat::Rgb888;

    #[inline(always)]
    fn from_color(c: Color) -> Self {
        c
    }
    #[inline(always)]
    fn to_color(self) -> Color {
        self
    }
    #[inline]
    fn write_le(self, dst: &mut [u8]) -> Option<usize> {
        dst.get_mut(..3)?.copy_from_slice(&[self.blue, self.green, self.red]);
        Some(3)
    }
    #[inline]
    fn read_le(src: &[u8]) -> Option<Self> {
        match *src.get(..3)? {
            [blue, green, red] => Some(Color { blue, green, red }),
            _ => None,
        }
    }
}

impl Pixel for Color32 {
    const FORMAT: ColorFormat = ColorFormat::Argb8888;

    /// Fully opaque.
    #[inline(always)]
    fn from_color(c: Color) -> Self {
        Color32::new(c.red, c.green, c.blue, 0xFF)
    }
    #[inline(always)]
    fn to_color(self) -> Color {
        Color32::to_color(self)
    }
    #[inline]
    fn write_le(self, dst: &mut [u8]) -> Option<usize> {
        dst.get_mut(..4)?.copy_from_slice(&self.to_bits().to_le_bytes());
        Some(4)
    }
    #[inline]
    fn read_le(src: &[u8]) -> Option<Self> {
        let bytes = src.get(..4)?;
        Some(Color32::from_bits(u32::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3],
        ])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_the_registry() {
        assert_eq!(<Color16 as Pixel>::SIZE, 2);
        assert_eq!(<Color as Pixel>::SIZE, 3);
        assert_eq!(<Color32 as Pixel>::SIZE, 4);
    }

    #[test]
    fn byte_images_are_little_endian() {
        let mut buf = [0u8; 4];
        assert_eq!(Color16(0xF81F).write_le(&mut buf), Some(2));
        assert_eq!(&buf[..2], &[0x1F, 0xF8]);

        assert_eq!(Color::new(1, 2, 3).write_le(&mut buf), Some(3));
        assert_eq!(&buf[..3], &[3, 2, 1]);

        assert_eq!(Color32::new(1, 2, 3, 4).write_le(&mut buf), Some(4));
        assert_eq!(buf, [3, 2, 1, 4]);
        assert_eq!(Color32::read_le(&buf), Some(Color32::new(1, 2, 3, 4)));
    }

    #[test]
    fn short_buffers_are_rejected() {
        let mut buf = [0u8; 2];
        assert_eq!(Color::WHITE.write_le(&mut buf), None);
        assert_eq!(buf, [0, 0]);
        assert_eq!(Color32::read_le(&buf), None);
        assert_eq!(Color16::read_le(&buf[..1]), None);
    }

    #[test]
    fn from_color_and_back() {
        let c = Color::hex(0xFF8000);
        assert_eq!(Color16::from_color(c), Color16(0xFC00));
        assert_eq!(Pixel::to_color(Color32::from_color(c)), c);
        assert_eq!(<Color as Pixel>::read_le(&[0x00, 0x80, 0xFF]), Some(c));
    }
}
