use serde::{Deserialize, Serialize};

use crate::anchor::AnchorResult;

/// Per-line text alignment inside the wrapped text box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    Left,
    Center,
    #[default]
    Right,
}

impl Alignment {
    /// Parse an alignment token, warning and falling back to right on
    /// anything unrecognized.
    pub fn parse(token: &str) -> Self {
        match token {
            "left" => Self::Left,
            "center" => Self::Center,
            "right" => Self::Right,
            other => {
                tracing::warn!(alignment = other, "invalid alignment, fallback to right");
                Self::default()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Alignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}

/// Positioned bounding box of wrapped watermark text, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A rasterized glyph: coverage bitmap plus horizontal metrics, all in
/// pixels at the font's scaled size.
#[derive(Clone, Debug)]
pub struct Glyph {
    pub width: usize,
    pub height: usize,
    pub xmin: i32,
    pub ymin: i32,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// A font loaded at a concrete pixel size.
///
/// This is the only contract layout and compositing code depend on; the
/// fontdue-backed implementation lives behind [`FontProvider`], and tests
/// substitute synthetic fonts.
///
/// [`FontProvider`]: crate::font::FontProvider
pub trait ScaledFont {
    /// Baseline-to-baseline advance for consecutive lines.
    fn line_height(&self) -> f64;

    /// Distance from the top of a line to its baseline.
    fn ascent(&self) -> f64;

    /// Measured width of a single unwrapped line.
    fn line_width(&self, text: &str) -> f64;

    /// Rasterize one character.
    fn rasterize(&self, ch: char) -> Glyph;
}

impl std::fmt::Debug for dyn ScaledFont + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ScaledFont")
    }
}

/// Scale a nominal point size by `canvas_height / reference_height` so text
/// stays visually proportional across output resolutions.
pub fn normalized_px(point: f64, canvas_height: u32, reference_height: f64) -> f32 {
    let dense = if reference_height.is_finite() && reference_height > 0.0 {
        f64::from(canvas_height) / reference_height
    } else {
        1.0
    };
    (point * dense).round() as f32
}

/// Width of the longest unwrapped input line; the default wrap width.
pub fn max_line_width(font: &dyn ScaledFont, text: &str) -> f64 {
    text.lines()
        .map(|line| font.line_width(line))
        .fold(0.0, f64::max)
}

/// Greedy word-wrap of each input line to `max_width`.
///
/// A single word wider than `max_width` stays on its own line rather than
/// being broken mid-word. Blank input lines are preserved.
pub fn wrap_lines(font: &dyn ScaledFont, text: &str, max_width: f64) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        let mut current = String::new();
        for word in line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
                continue;
            }
            let candidate = format!("{current} {word}");
            if font.line_width(&candidate) <= max_width {
                current = candidate;
            } else {
                out.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        out.push(current);
    }
    out
}

/// Fully measured and positioned watermark text, ready to paint.
#[derive(Clone, Debug)]
pub struct TextLayout {
    pub lines: Vec<String>,
    pub bounds: TextBox,
    /// Vertical advance between consecutive line tops.
    pub line_advance: f64,
}

/// Wrap and measure `text`, then place its bounding box so that the anchor
/// fraction of the box coincides with the anchor point. The box is clamped
/// to the canvas.
pub fn layout(
    font: &dyn ScaledFont,
    text: &str,
    anchor: &AnchorResult,
    line_spacing: f64,
    wrap_width: Option<f64>,
    canvas_width: f64,
    canvas_height: f64,
) -> TextLayout {
    let width = wrap_width.unwrap_or_else(|| max_line_width(font, text));
    let lines = wrap_lines(font, text, width);

    let font_height = font.line_height();
    // n lines advance by spacing * height each, minus the trailing gap
    let height =
        lines.len() as f64 * font_height * line_spacing - (line_spacing - 1.0) * font_height;

    let x = (anchor.x - anchor.ax * width).clamp(0.0, canvas_width);
    let y = (anchor.y - anchor.ay * height).clamp(0.0, canvas_height);

    TextLayout {
        lines,
        bounds: TextBox {
            x,
            y,
            width: width.min(canvas_width - x),
            height: height.min(canvas_height - y),
        },
        line_advance: font_height * line_spacing,
    }
}

/// Left edge of one line inside the box, honoring the alignment.
pub fn line_x(alignment: Alignment, bounds: &TextBox, line_width: f64) -> f64 {
    match alignment {
        Alignment::Left => bounds.x,
        Alignment::Center => bounds.x + (bounds.width - line_width) / 2.0,
        Alignment::Right => bounds.x + bounds.width - line_width,
    }
}
