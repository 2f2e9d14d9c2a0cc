use serde::{Deserialize, Serialize};

use crate::viewport::FilledRect;

/// Default margin fraction applied when a configured margin is negative.
pub const DEFAULT_MARGIN: f64 = 0.05;

/// One of the nine canonical watermark positions on the 3x3 grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Row {
    Top,
    Middle,
    Bottom,
}

impl Position {
    /// Parse a position token. Unknown tokens warn and fall back to
    /// bottom-right; configuration problems never abort a render.
    pub fn parse(token: &str) -> Self {
        match token {
            "top-left" => Self::TopLeft,
            "top-center" => Self::TopCenter,
            "top-right" => Self::TopRight,
            "middle-left" => Self::MiddleLeft,
            "middle-center" => Self::MiddleCenter,
            "middle-right" => Self::MiddleRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-center" => Self::BottomCenter,
            "bottom-right" => Self::BottomRight,
            other => {
                tracing::warn!(position = other, "invalid position, fallback to bottom-right");
                Self::default()
            }
        }
    }

    /// Which point of the text box coincides with the anchor coordinate.
    pub fn anchor_fraction(self) -> (f64, f64) {
        let ax = match self.column() {
            Column::Left => 0.0,
            Column::Center => 0.5,
            Column::Right => 1.0,
        };
        let ay = match self.row() {
            Row::Top => 0.0,
            Row::Middle => 0.5,
            Row::Bottom => 1.0,
        };
        (ax, ay)
    }

    fn column(self) -> Column {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => Column::Left,
            Self::TopCenter | Self::MiddleCenter | Self::BottomCenter => Column::Center,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => Column::Right,
        }
    }

    fn row(self) -> Row {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Row::Top,
            Self::MiddleLeft | Self::MiddleCenter | Self::MiddleRight => Row::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Row::Bottom,
        }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}

/// Resolved anchor point plus the anchor fraction of the box that lands on
/// it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorResult {
    pub x: f64,
    pub y: f64,
    pub ax: f64,
    pub ay: f64,
}

/// Convert one configured margin into pixels.
///
/// Negative values take the default fraction; values below 1 are fractions
/// of the filled dimension; anything else is already pixels.
fn resolve_margin(value: f64, filled_dim: f64) -> f64 {
    let value = if value < 0.0 { DEFAULT_MARGIN } else { value };
    if value < 1.0 { value * filled_dim } else { value }
}

/// Map a position and margins onto an anchor point inside `frame`.
///
/// `frame` is the filled-viewport rect of the canvas, so margins measure
/// inward from the region that stays visible after the desktop crops the
/// wallpaper, never from a band that will be cut away.
pub fn resolve_anchor(
    position: Position,
    margin_h: f64,
    margin_v: f64,
    frame: &FilledRect,
) -> AnchorResult {
    let margin_h = resolve_margin(margin_h, frame.width);
    let margin_v = resolve_margin(margin_v, frame.height);

    let x = match position.column() {
        Column::Left => frame.x + margin_h,
        Column::Center => frame.x + frame.width / 2.0,
        Column::Right => frame.right() - margin_h,
    };
    let y = match position.row() {
        Row::Top => frame.y + margin_v,
        Row::Middle => frame.y + frame.height / 2.0,
        Row::Bottom => frame.bottom() - margin_v,
    };
    let (ax, ay) = position.anchor_fraction();
    tracing::debug!(x, y, ax, ay, "watermark anchor resolved");

    AnchorResult { x, y, ax, ay }
}
