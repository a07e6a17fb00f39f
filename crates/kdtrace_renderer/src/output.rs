//! Color transfer functions and PNG output.
//!
//! The renderer works in linear light; values are only encoded and clamped
//! when written out.

use crate::{Color, ImageBuffer, RenderResult};
use std::path::Path;

/// Linear to sRGB transfer function.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// sRGB to linear transfer function.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    if srgb <= 0.040_45 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// Plain gamma 2.2 encoding.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.powf(1.0 / 2.2)
    } else {
        0.0
    }
}

#[inline]
pub fn gamma_to_linear(gamma: f32) -> f32 {
    if gamma > 0.0 {
        gamma.powf(2.2)
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit sRGB RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let encode = |c: f32| (255.0 * linear_to_srgb(c).clamp(0.0, 1.0)).round() as u8;
    [encode(color.x), encode(color.y), encode(color.z), 255]
}

/// Write the image as an 8-bit RGBA PNG.
pub fn save_png(image: &ImageBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    image::save_buffer_with_format(
        path,
        &image.to_rgba(),
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    log::info!(
        "Wrote {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_roundtrip_endpoints() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // Linear segment near black
        assert!((linear_to_srgb(0.001) - 0.01292).abs() < 1e-7);
        // Mid grey
        assert!((linear_to_srgb(0.5) - 0.735_357).abs() < 1e-4);
        assert!((srgb_to_linear(linear_to_srgb(0.18)) - 0.18).abs() < 1e-5);
    }

    #[test]
    fn test_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-6);
        assert!((gamma_to_linear(linear_to_gamma(0.25)) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::splat(4.0)), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(-1.0, 1.0, 0.0)), [0, 255, 0, 255]);
    }

    #[test]
    fn test_save_png() {
        let mut image = ImageBuffer::new(4, 2);
        image.set(1, 1, Color::ONE);

        let path = std::env::temp_dir().join("kdtrace_test_save_png.png");
        save_png(&image, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert_eq!(loaded.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0, 255]);

        std::fs::remove_file(&path).ok();
    }
}
