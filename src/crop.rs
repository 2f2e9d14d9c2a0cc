use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::viewport::{ViewportSpec, filled_rect};

/// When the fill-crop runs.
///
/// `WindowsOnly` exists because most Linux/macOS desktops fill-crop the
/// wallpaper themselves, while classic Windows tiling does not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum CropMode {
    #[serde(rename = "no")]
    Disabled,
    #[serde(rename = "win-only")]
    #[default]
    WindowsOnly,
    #[serde(rename = "yes")]
    Always,
}

impl CropMode {
    /// Parse a configured crop token. Unknown tokens warn and disable
    /// cropping instead of failing the render.
    pub fn parse(token: &str) -> Self {
        match token {
            "no" => Self::Disabled,
            "win-only" => Self::WindowsOnly,
            "yes" => Self::Always,
            other => {
                tracing::warn!(crop = other, "unknown crop option");
                Self::Disabled
            }
        }
    }

    fn is_active(self) -> bool {
        match self {
            Self::Disabled => false,
            Self::WindowsOnly => cfg!(target_os = "windows"),
            Self::Always => true,
        }
    }
}

impl<'de> Deserialize<'de> for CropMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}

/// Crop the decoded photo to the centered filled-viewport rect and
/// materialize it as a fresh RGBA8 canvas.
///
/// The returned buffer is always an owned copy; the caller may drop the
/// source immediately. Pixel representations outside the supported baseline
/// set pass through uncropped (converted to RGBA8) with a warning.
pub fn crop(image: DynamicImage, mode: CropMode, spec: &ViewportSpec) -> RgbaImage {
    if !mode.is_active() {
        return image.into_rgba8();
    }

    let (w0, h0) = (image.width(), image.height());
    let supported = matches!(
        image,
        DynamicImage::ImageRgba8(_) | DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba16(_)
    );
    if !supported {
        tracing::warn!(color_type = ?image.color(), "unsupported pixel format, skipping crop");
        return image.into_rgba8();
    }

    let rect = filled_rect(f64::from(w0), f64::from(h0), spec);
    let x = rect.x as u32;
    let y = rect.y as u32;
    let w = (rect.width as u32).min(w0 - x);
    let h = (rect.height as u32).min(h0 - y);
    tracing::debug!(x, y, w, h, "viewport located");

    image.crop_imm(x, y, w, h).into_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient_rgba(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255])
        })
    }

    #[test]
    fn parse_tokens() {
        assert_eq!(CropMode::parse("no"), CropMode::Disabled);
        assert_eq!(CropMode::parse("win-only"), CropMode::WindowsOnly);
        assert_eq!(CropMode::parse("yes"), CropMode::Always);
        assert_eq!(CropMode::parse("maybe"), CropMode::Disabled);
    }

    #[test]
    fn deserialize_never_fails() {
        let mode: CropMode = serde_json::from_str("\"yes\"").unwrap();
        assert_eq!(mode, CropMode::Always);
        let mode: CropMode = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(mode, CropMode::Disabled);
    }

    #[test]
    fn disabled_mode_passes_through() {
        let src = gradient_rgba(200, 100);
        let out = crop(
            DynamicImage::ImageRgba8(src.clone()),
            CropMode::Disabled,
            &ViewportSpec::new(16.0, 9.0),
        );
        assert_eq!(out.dimensions(), (200, 100));
        assert_eq!(out, src);
    }

    #[test]
    fn crop_is_centered_and_materialized() {
        let src = gradient_rgba(200, 100);
        let out = crop(
            DynamicImage::ImageRgba8(src.clone()),
            CropMode::Always,
            &ViewportSpec::new(16.0, 9.0),
        );
        // 200x100 is wider than 16:9, width shrinks to 100 * 16/9 = 177.7
        let (w, h) = out.dimensions();
        assert_eq!(h, 100);
        assert!((176..=178).contains(&w));
        // symmetric cut within 1px of truncation
        let left_cut = (200 - w) / 2;
        // top-left of the crop matches the source at the cut offset
        assert_eq!(out.get_pixel(0, 0), src.get_pixel(left_cut, 0));
    }

    #[test]
    fn invalid_viewport_keeps_dimensions() {
        let src = gradient_rgba(123, 77);
        let out = crop(
            DynamicImage::ImageRgba8(src),
            CropMode::Always,
            &ViewportSpec::default(),
        );
        assert_eq!(out.dimensions(), (123, 77));
    }

    #[test]
    fn unsupported_format_passes_through_uncropped() {
        let gray = image::GrayImage::from_pixel(200, 100, image::Luma([42]));
        let out = crop(
            DynamicImage::ImageLuma8(gray),
            CropMode::Always,
            &ViewportSpec::new(16.0, 9.0),
        );
        assert_eq!(out.dimensions(), (200, 100));
        assert_eq!(out.get_pixel(0, 0), &Rgba([42, 42, 42, 255]));
    }

    #[test]
    fn rgb8_is_supported() {
        let rgb = image::RgbImage::from_pixel(100, 200, image::Rgb([1, 2, 3]));
        let out = crop(
            DynamicImage::ImageRgb8(rgb),
            CropMode::Always,
            &ViewportSpec::new(1.0, 1.0),
        );
        assert_eq!(out.dimensions(), (100, 100));
    }
}
