// src/context.rs

//! Native format selection.
//!
//! A [`ColorContext`] is derived from a [`ColorConfig`] and holds every
//! constant that depends on the configured color depth. One context is
//! installed per process with [`install`]; afterwards it never changes and
//! can be read from any thread through [`global`].

use anyhow::{bail, Result};
use log::{debug, info};
use once_cell::sync::OnceCell;

use crate::color::{Color, Color16, Color32};
use crate::config::{ColorConfig, ColorDepth};
use crate::format::ColorFormat;
use crate::mix::{luminance, MixStrategy, Mixer16};
use crate::opa::Opa;
use crate::pixel::Pixel;

/// Depth-dependent formats and the selected RGB565 mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorContext {
    config: ColorConfig,
    native: ColorFormat,
    native_with_alpha: Option<ColorFormat>,
}

impl ColorContext {
    pub const fn new(config: ColorConfig) -> Self {
        let (native, native_with_alpha) = match config.depth {
            ColorDepth::Depth8 => (ColorFormat::L8, None),
            ColorDepth::Depth16 => (ColorFormat::Rgb565, Some(ColorFormat::Rgb565A8)),
            ColorDepth::Depth24 => (ColorFormat::Rgb888, Some(ColorFormat::Argb8888)),
            ColorDepth::Depth32 => (ColorFormat::Xrgb8888, Some(ColorFormat::Argb8888)),
        };
        ColorContext {
            config,
            native,
            native_with_alpha,
        }
    }

    pub const fn config(&self) -> ColorConfig {
        self.config
    }

    pub const fn depth(&self) -> ColorDepth {
        self.config.depth
    }

    /// The format the renderer draws into.
    pub const fn native(&self) -> ColorFormat {
        self.native
    }

    /// The native format extended with alpha; `None` at 8-bit depth.
    pub const fn native_with_alpha(&self) -> Option<ColorFormat> {
        self.native_with_alpha
    }

    /// Bytes of one native pixel plus its alpha.
    ///
    /// At 16-bit depth this is the RGB565 pixel plus its A8 plane entry, and
    /// at 8-bit depth an L8 value plus a separate alpha byte.
    pub const fn native_with_alpha_size(&self) -> u8 {
        match self.config.depth {
            ColorDepth::Depth8 => 2,
            ColorDepth::Depth16 => 3,
            ColorDepth::Depth24 | ColorDepth::Depth32 => 4,
        }
    }

    pub const fn mix_strategy(&self) -> MixStrategy {
        self.config.mix_strategy
    }

    /// Mixes two RGB565 colors with the configured strategy.
    #[inline]
    pub fn mix16(&self, c1: Color16, c2: Color16, mix: Opa) -> Color16 {
        self.config.mix_strategy.mix16(c1, c2, mix)
    }

    /// Encodes `color` in the native format at the front of `dst`.
    ///
    /// Returns the number of bytes written, or `None` if `dst` is too short.
    pub fn write_native(&self, color: Color, dst: &mut [u8]) -> Option<usize> {
        match self.native {
            ColorFormat::L8 => {
                *dst.first_mut()? = luminance(color);
                Some(1)
            }
            ColorFormat::Rgb565 => Color16::from_color(color).write_le(dst),
            ColorFormat::Rgb888 => color.write_le(dst),
            _ => Color32::from_color(color).write_le(dst),
        }
    }

    /// Decodes a native pixel from the front of `src`. L8 pixels decode to
    /// grey.
    pub fn read_native(&self, src: &[u8]) -> Option<Color> {
        match self.native {
            ColorFormat::L8 => src.first().map(|&l| Color::new(l, l, l)),
            ColorFormat::Rgb565 => Color16::read_le(src).map(Pixel::to_color),
            ColorFormat::Rgb888 => Color::read_le(src),
            _ => Color32::read_le(src).map(Pixel::to_color),
        }
    }
}

impl Default for ColorContext {
    fn default() -> Self {
        ColorContext::new(ColorConfig::default())
    }
}

impl From<ColorConfig> for ColorContext {
    fn from(config: ColorConfig) -> Self {
        ColorContext::new(config)
    }
}

static GLOBAL_CONTEXT: OnceCell<ColorContext> = OnceCell::new();

/// Installs the process-wide context.
///
/// Installing the same configuration again is a no-op; a different one is an
/// error, since the native format cannot change once rendering has started.
pub fn install(config: ColorConfig) -> Result<&'static ColorContext> {
    let mut installed_now = false;
    let ctx = GLOBAL_CONTEXT.get_or_init(|| {
        installed_now = true;
        ColorContext::new(config)
    });
    if installed_now {
        info!(
            "Color context installed: depth {}, native {}, mixer {:?}",
            ctx.depth(),
            ctx.native(),
            ctx.mix_strategy()
        );
    } else if ctx.config() != config {
        bail!(
            "Color context already installed with {:?}; refusing to switch to {:?}",
            ctx.config(),
            config
        );
    }
    Ok(ctx)
}

/// The process-wide context, installing the default configuration if
/// nothing was installed yet.
pub fn global() -> &'static ColorContext {
    GLOBAL_CONTEXT.get_or_init(|| {
        debug!("No color context installed, using the default configuration");
        ColorContext::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(depth: ColorDepth) -> ColorContext {
        ColorContext::new(ColorConfig::new(depth, MixStrategy::Packed))
    }

    #[test]
    fn formats_by_depth() {
        let table = [
            (ColorDepth::Depth8, ColorFormat::L8, None, 2),
            (ColorDepth::Depth16, ColorFormat::Rgb565, Some(ColorFormat::Rgb565A8), 3),
            (ColorDepth::Depth24, ColorFormat::Rgb888, Some(ColorFormat::Argb8888), 4),
            (ColorDepth::Depth32, ColorFormat::Xrgb8888, Some(ColorFormat::Argb8888), 4),
        ];
        for (depth, native, with_alpha, alpha_size) in table {
            let c = ctx(depth);
            assert_eq!(c.native(), native);
            assert_eq!(c.native_with_alpha(), with_alpha);
            assert_eq!(c.native_with_alpha_size(), alpha_size);
            assert_eq!(c.native().bpp(), depth.bits());
        }
    }

    #[test]
    fn mix16_follows_the_configured_strategy() {
        let (a, b) = (Color16(0xF800), Color16(0x001F));
        let packed = ctx(ColorDepth::Depth16);
        let shift_add =
            ColorContext::new(ColorConfig::new(ColorDepth::Depth16, MixStrategy::ShiftAdd));
        assert_eq!(shift_add.mix_strategy(), MixStrategy::ShiftAdd);
        for w in 0..=255u8 {
            assert_eq!(packed.mix16(a, b, Opa(w)), shift_add.mix16(a, b, Opa(w)));
        }
    }

    #[test]
    fn native_encoding_per_depth() {
        let orange = Color::hex(0xFF8000);
        let mut buf = [0u8; 4];

        assert_eq!(ctx(ColorDepth::Depth8).write_native(orange, &mut buf), Some(1));
        assert_eq!(buf[0], luminance(orange));

        assert_eq!(ctx(ColorDepth::Depth16).write_native(orange, &mut buf), Some(2));
        assert_eq!(&buf[..2], &0xFC00u16.to_le_bytes());

        assert_eq!(ctx(ColorDepth::Depth24).write_native(orange, &mut buf), Some(3));
        assert_eq!(&buf[..3], &[0x00, 0x80, 0xFF]);

        assert_eq!(ctx(ColorDepth::Depth32).write_native(orange, &mut buf), Some(4));
        assert_eq!(buf, [0x00, 0x80, 0xFF, 0xFF]);
        assert_eq!(ctx(ColorDepth::Depth32).read_native(&buf), Some(orange));
    }

    #[test]
    fn native_decoding() {
        assert_eq!(
            ctx(ColorDepth::Depth8).read_native(&[77]),
            Some(Color::new(77, 77, 77))
        );
        assert_eq!(
            ctx(ColorDepth::Depth16).read_native(&[0x00, 0xF8]),
            Some(Color::hex(0xFF0000))
        );
        assert_eq!(ctx(ColorDepth::Depth24).read_native(&[1, 2]), None);
        assert_eq!(ctx(ColorDepth::Depth8).write_native(Color::WHITE, &mut []), None);
    }
}
