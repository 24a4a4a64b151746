// src/config.rs

//! Build configuration for the color core.
//!
//! A single [`ColorDepth`] decides which pixel encoding is native for the
//! whole process; [`MixStrategy`] picks the RGB565 blend implementation.
//! The configuration can be deserialized from JSON or read from the
//! environment, and is turned into a [`crate::ColorContext`] once at
//! start-up.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::mix::MixStrategy;

/// Environment variable holding the color depth (8, 16, 24 or 32).
pub const DEPTH_ENV_VAR: &str = "PIXELMIX_COLOR_DEPTH";
/// Environment variable holding the mix strategy (`packed` or `shift_add`).
pub const MIX_STRATEGY_ENV_VAR: &str = "PIXELMIX_MIX_STRATEGY";

/// Bits per native pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ColorDepth {
    /// 8-bit luminance.
    Depth8,
    /// RGB565.
    #[default]
    Depth16,
    /// RGB888.
    Depth24,
    /// XRGB8888.
    Depth32,
}

impl ColorDepth {
    pub const fn bits(self) -> u8 {
        match self {
            ColorDepth::Depth8 => 8,
            ColorDepth::Depth16 => 16,
            ColorDepth::Depth24 => 24,
            ColorDepth::Depth32 => 32,
        }
    }
}

/// A color depth other than 8, 16, 24 or 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDepth(pub u8);

impl fmt::Display for InvalidDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported color depth {}; expected 8, 16, 24 or 32", self.0)
    }
}

impl std::error::Error for InvalidDepth {}

impl TryFrom<u8> for ColorDepth {
    type Error = InvalidDepth;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(ColorDepth::Depth8),
            16 => Ok(ColorDepth::Depth16),
            24 => Ok(ColorDepth::Depth24),
            32 => Ok(ColorDepth::Depth32),
            other => Err(InvalidDepth(other)),
        }
    }
}

impl From<ColorDepth> for u8 {
    fn from(depth: ColorDepth) -> u8 {
        depth.bits()
    }
}

impl fmt::Display for ColorDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// The complete color core configuration.
///
/// Missing fields take their defaults: 16-bit depth and the packed mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Native color depth.
    pub depth: ColorDepth,
    /// RGB565 blend implementation.
    pub mix_strategy: MixStrategy,
}

impl ColorConfig {
    pub fn new(depth: ColorDepth, mix_strategy: MixStrategy) -> Self {
        ColorConfig {
            depth,
            mix_strategy,
        }
    }

    /// Parses a JSON document such as `{"depth": 24, "mix_strategy": "shift_add"}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ColorConfig =
            serde_json::from_str(json).context("Failed to parse color configuration JSON")?;
        debug!("Parsed color configuration: {:?}", config);
        Ok(config)
    }

    /// Starts from the defaults and applies [`DEPTH_ENV_VAR`] and
    /// [`MIX_STRATEGY_ENV_VAR`] when they are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ColorConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ColorConfig::default();

        if let Some(raw) = lookup(DEPTH_ENV_VAR) {
            let bits: u8 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} is not a number: '{}'", DEPTH_ENV_VAR, raw))?;
            config.depth = ColorDepth::try_from(bits)
                .with_context(|| format!("Invalid {}", DEPTH_ENV_VAR))?;
        }

        if let Some(raw) = lookup(MIX_STRATEGY_ENV_VAR) {
            config.mix_strategy = match raw.trim().to_ascii_lowercase().as_str() {
                "packed" => MixStrategy::Packed,
                "shift_add" | "shift-add" => MixStrategy::ShiftAdd,
                "" => {
                    warn!("{} is empty, using the packed mixer", MIX_STRATEGY_ENV_VAR);
                    MixStrategy::Packed
                }
                other => anyhow::bail!(
                    "Invalid {}: '{}' (expected 'packed' or 'shift_add')",
                    MIX_STRATEGY_ENV_VAR,
                    other
                ),
            };
        }

        debug!("Color configuration from environment: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_log::test;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ColorConfig::default();
        assert_eq!(config.depth, ColorDepth::Depth16);
        assert_eq!(config.mix_strategy, MixStrategy::Packed);
    }

    #[test]
    fn depth_accepts_only_supported_bit_counts() {
        for bits in 0..=u8::MAX {
            let parsed = ColorDepth::try_from(bits);
            match bits {
                8 | 16 | 24 | 32 => assert_eq!(parsed.map(u8::from), Ok(bits)),
                _ => assert_eq!(parsed, Err(InvalidDepth(bits))),
            }
        }
    }

    #[test]
    fn parses_json() {
        let config =
            ColorConfig::from_json_str(r#"{"depth": 24, "mix_strategy": "shift_add"}"#).unwrap();
        assert_eq!(config, ColorConfig::new(ColorDepth::Depth24, MixStrategy::ShiftAdd));

        let partial = ColorConfig::from_json_str(r#"{"depth": 8}"#).unwrap();
        assert_eq!(partial, ColorConfig::new(ColorDepth::Depth8, MixStrategy::Packed));

        assert_eq!(ColorConfig::from_json_str("{}").unwrap(), ColorConfig::default());
    }

    #[test]
    fn rejects_bad_json() {
        let err = ColorConfig::from_json_str(r#"{"depth": 12}"#).unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported color depth 12"));
        assert!(ColorConfig::from_json_str(r#"{"mix_strategy": "fast"}"#).is_err());
        assert!(ColorConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn json_round_trip_keeps_numeric_depth() {
        let config = ColorConfig::new(ColorDepth::Depth32, MixStrategy::ShiftAdd);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"depth":32,"mix_strategy":"shift_add"}"#);
    }

    #[test]
    fn environment_overrides() {
        let config = ColorConfig::from_lookup(lookup_in(&[
            (DEPTH_ENV_VAR, " 32 "),
            (MIX_STRATEGY_ENV_VAR, "Shift-Add"),
        ]))
        .unwrap();
        assert_eq!(config, ColorConfig::new(ColorDepth::Depth32, MixStrategy::ShiftAdd));

        let untouched = ColorConfig::from_lookup(lookup_in(&[])).unwrap();
        assert_eq!(untouched, ColorConfig::default());

        let empty = ColorConfig::from_lookup(lookup_in(&[(MIX_STRATEGY_ENV_VAR, "")])).unwrap();
        assert_eq!(empty.mix_strategy, MixStrategy::Packed);
    }

    #[test]
    fn environment_errors() {
        assert!(ColorConfig::from_lookup(lookup_in(&[(DEPTH_ENV_VAR, "sixteen")])).is_err());
        assert!(ColorConfig::from_lookup(lookup_in(&[(DEPTH_ENV_VAR, "15")])).is_err());
        assert!(ColorConfig::from_lookup(lookup_in(&[(MIX_STRATEGY_ENV_VAR, "simd")])).is_err());
    }
}
