use std::path::{Path, PathBuf};

use crate::error::{WallmarkError, WallmarkResult};
use crate::text::{Glyph, ScaledFont};

/// Maps a configured font name onto a loadable font file path.
///
/// Search strategy (user font directories, system directories, substring
/// fallback) belongs to the embedding application; this crate only depends
/// on the found/not-found contract.
pub trait FontResolver {
    fn resolve(&self, font: &str) -> WallmarkResult<PathBuf>;
}

/// Resolver that accepts a font name only when it already is a readable
/// file path.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectFontResolver;

impl FontResolver for DirectFontResolver {
    fn resolve(&self, font: &str) -> WallmarkResult<PathBuf> {
        let path = Path::new(font);
        if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(WallmarkError::font_not_found(font))
        }
    }
}

/// Loads fonts at a concrete pixel size.
///
/// The only place compositing reaches for the filesystem; tests substitute
/// an in-memory implementation.
pub trait FontProvider {
    fn load(&self, font: &str, px: f32) -> WallmarkResult<Box<dyn ScaledFont>>;
}

/// [`FontProvider`] backed by a [`FontResolver`] and fontdue parsing.
pub struct FontdueProvider {
    resolver: Box<dyn FontResolver>,
}

impl FontdueProvider {
    pub fn new(resolver: impl FontResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }
}

impl FontProvider for FontdueProvider {
    fn load(&self, font: &str, px: f32) -> WallmarkResult<Box<dyn ScaledFont>> {
        let path = self.resolver.resolve(font)?;
        let bytes = std::fs::read(&path)
            .map_err(|err| WallmarkError::font_load(format!("{}: {err}", path.display())))?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|err| WallmarkError::font_load(format!("{}: {err}", path.display())))?;
        Ok(Box::new(FontdueFont { font, px }))
    }
}

struct FontdueFont {
    font: fontdue::Font,
    px: f32,
}

impl ScaledFont for FontdueFont {
    fn line_height(&self) -> f64 {
        self.font
            .horizontal_line_metrics(self.px)
            .map_or(f64::from(self.px), |m| f64::from(m.new_line_size))
    }

    fn ascent(&self) -> f64 {
        self.font
            .horizontal_line_metrics(self.px)
            .map_or(f64::from(self.px) * 0.8, |m| f64::from(m.ascent))
    }

    fn line_width(&self, text: &str) -> f64 {
        text.chars()
            .map(|ch| f64::from(self.font.metrics(ch, self.px).advance_width))
            .sum()
    }

    fn rasterize(&self, ch: char) -> Glyph {
        let (metrics, coverage) = self.font.rasterize(ch, self.px);
        Glyph {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            advance: metrics.advance_width,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_is_not_found() {
        let err = DirectFontResolver
            .resolve("/definitely/not/a/font.ttf")
            .unwrap_err();
        assert!(matches!(err, WallmarkError::FontNotFound(_)));
    }

    #[test]
    fn unparsable_font_file_is_a_load_error() {
        let path = std::env::temp_dir().join("wallmark-not-a-font.ttf");
        std::fs::write(&path, b"definitely not sfnt data").unwrap();

        let provider = FontdueProvider::new(DirectFontResolver);
        let err = provider.load(path.to_str().unwrap(), 16.0).unwrap_err();
        assert!(matches!(err, WallmarkError::FontLoad(_)));

        let _ = std::fs::remove_file(&path);
    }
}
