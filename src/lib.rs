// src/lib.rs

//! Color representation and fixed-point pixel blending for a software
//! rasterizer.
//!
//! The crate defines the in-memory color encodings ([`Color`] RGB888,
//! [`Color16`] RGB565, [`Color32`] ARGB8888), the [`ColorFormat`] registry,
//! conversions between encodings, and the per-pixel mixing primitives the
//! compositor calls for every blend. The native framebuffer format is chosen
//! once per process from a [`ColorConfig`] and exposed through
//! [`ColorContext`].
//!
//! # No validation
//!
//! Nothing in the color core checks its inputs. Builders store channel
//! values at their fixed width, so out-of-range values wrap or truncate
//! instead of being rejected, and metadata queries on an unrecognized format
//! tag return 0 or `false`. Callers must not assume bounds checking. The only
//! fallible operations are loading and installing configuration.
//!
//! Every function is pure and allocation-free and may be called from any
//! thread.

pub mod color;
pub mod config;
pub mod context;
pub mod convert;
pub mod filter;
pub mod format;
pub mod mix;
pub mod opa;
pub mod pixel;

pub use color::{Color, Color16, Color32};
pub use config::{ColorConfig, ColorDepth, InvalidDepth};
pub use context::ColorContext;
pub use convert::{hsv_to_rgb, rgb_to_hsv, Hsv};
pub use filter::{ColorFilter, Shade};
pub use format::{ColorFormat, FormatFlags, FormatInfo, UnknownFormat};
pub use mix::{
    brightness, darken, lighten, luminance, mix, mix16, mix32, MixStrategy, Mixer16, PackedMixer,
    ShiftAddMixer,
};
pub use opa::Opa;
pub use pixel::Pixel;
