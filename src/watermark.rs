use serde::{Deserialize, Serialize};

use crate::anchor::Position;
use crate::crop::CropMode;
use crate::text::Alignment;
use crate::viewport::ViewportSpec;

/// Background plate behind one watermark's text.
///
/// An empty color string means "no plate". Field names match the daemon's
/// configuration keys.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BackgroundSpec {
    pub paddings: Vec<f64>,
    pub h_throughout: bool,
    pub v_throughout: bool,
    pub color: String,
}

/// One configured text overlay, immutable for the duration of a render
/// call. `text` is the final display string; template expansion happens in
/// the configuration layer before it reaches this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WatermarkDefinition {
    pub font: String,
    pub point: f64,
    pub color: String,
    pub position: Position,
    pub h_margin: f64,
    pub v_margin: f64,
    pub linespace: f64,
    pub alignment: Alignment,
    pub text: String,
    /// Overrides the measured longest-line wrap width when set.
    pub wrap_width: Option<f64>,
    pub background: BackgroundSpec,
}

impl Default for WatermarkDefinition {
    fn default() -> Self {
        Self {
            font: String::new(),
            point: 20.0,
            color: String::new(),
            position: Position::default(),
            // negative means "use the default margin fraction"
            h_margin: -1.0,
            v_margin: -1.0,
            linespace: 1.0,
            alignment: Alignment::default(),
            text: String::new(),
            wrap_width: None,
            background: BackgroundSpec::default(),
        }
    }
}

impl WatermarkDefinition {
    pub fn has_background(&self) -> bool {
        !self.background.color.is_empty()
    }
}

/// Per-call render settings supplied by the external configuration layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderOptions {
    pub crop: CropMode,
    #[serde(flatten)]
    pub viewport: ViewportSpec,
    pub debug_rendering: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_daemon_style_keys() {
        let def: WatermarkDefinition = serde_json::from_str(
            r#"{
                "font": "Courier.ttf",
                "point": 14.0,
                "color": "ffffff",
                "position": "bottom-left",
                "h-margin": 0.02,
                "v-margin": 40.0,
                "linespace": 1.4,
                "alignment": "left",
                "text": "Photo of the Day",
                "background": {
                    "color": "00000080",
                    "paddings": [0.1, 0.2],
                    "h-throughout": true
                }
            }"#,
        )
        .unwrap();
        assert_eq!(def.position, Position::BottomLeft);
        assert_eq!(def.alignment, Alignment::Left);
        assert_eq!(def.h_margin, 0.02);
        assert!(def.background.h_throughout);
        assert!(!def.background.v_throughout);
        assert!(def.has_background());
    }

    #[test]
    fn defaults_are_render_safe() {
        let def = WatermarkDefinition::default();
        assert_eq!(def.position, Position::BottomRight);
        assert_eq!(def.alignment, Alignment::Right);
        assert_eq!(def.linespace, 1.0);
        assert!(def.h_margin < 0.0);
        assert!(!def.has_background());
    }

    #[test]
    fn options_flatten_reference_dimensions() {
        let options: RenderOptions = serde_json::from_str(
            r#"{
                "crop": "yes",
                "reference-width": 1920.0,
                "reference-height": 1080.0,
                "debug-rendering": true
            }"#,
        )
        .unwrap();
        assert_eq!(options.crop, CropMode::Always);
        assert_eq!(options.viewport.fill_ratio(), Some(1920.0 / 1080.0));
        assert!(options.debug_rendering);
    }
}
