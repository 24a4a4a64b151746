//! End-to-end checks through the process-wide color context.
//!
//! The context is process global, so everything that installs it lives in
//! one test function.

use pixelmix::context;
use pixelmix::{Color, Color16, ColorConfig, ColorDepth, ColorFormat, MixStrategy, Opa};

/// Per-channel expectation for the RGB565 blend at `weight`.
fn expected_blend(fg: Color16, bg: Color16, weight: u8) -> Color16 {
    let m = (weight as i32 + 4) >> 3;
    let ch = |f: u8, b: u8| (b as i32 + ((f as i32 - b as i32) * m).div_euclid(32)) as u8;
    Color16::new(
        ch(fg.red(), bg.red()),
        ch(fg.green(), bg.green()),
        ch(fg.blue(), bg.blue()),
    )
}

#[test_log::test]
fn depth16_pipeline() {
    let config = ColorConfig::from_json_str(r#"{"depth": 16}"#).unwrap();
    let ctx = context::install(config).unwrap();
    assert_eq!(ctx.native(), ColorFormat::Rgb565);
    assert_eq!(ctx.native_with_alpha(), Some(ColorFormat::Rgb565A8));
    assert_eq!(ctx.native().size(), 2);

    // Re-installing the same configuration is allowed, a different one is not.
    assert!(context::install(config).is_ok());
    let err = context::install(ColorConfig::new(ColorDepth::Depth32, MixStrategy::Packed))
        .unwrap_err();
    assert!(err.to_string().contains("already installed"));
    assert_eq!(context::global().native(), ColorFormat::Rgb565);

    let orange = Color16(Color::hex(0xFF8000).to_u16());
    let black = Color16(Color::hex(0x000000).to_u16());
    let half = ctx.mix16(orange, black, Opa(128));

    assert_eq!(half, expected_blend(orange, black, 128));
    assert_eq!((half.red(), half.green(), half.blue()), (15, 16, 0));
    assert_eq!(half, Color16(0x7A00));

    // Weighted endpoints through the configured mixer.
    assert_eq!(ctx.mix16(orange, black, Opa::COVER), orange);
    assert_eq!(ctx.mix16(orange, black, Opa::TRANSP), black);

    let mut framebuffer = [0u8; 2];
    assert_eq!(ctx.write_native(half.to_color(), &mut framebuffer), Some(2));
    assert_eq!(u16::from_le_bytes(framebuffer), 0x7A00);
}
