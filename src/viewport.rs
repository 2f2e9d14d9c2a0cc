use serde::{Deserialize, Serialize};

/// Reference screen dimensions the wallpaper should fill.
///
/// Zero (the default), negative, or non-finite values disable fill-crop
/// entirely; the source image then passes through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ViewportSpec {
    pub reference_width: f64,
    pub reference_height: f64,
}

impl ViewportSpec {
    pub fn new(reference_width: f64, reference_height: f64) -> Self {
        Self {
            reference_width,
            reference_height,
        }
    }

    /// Target aspect ratio, or `None` when the spec is unset or degenerate.
    pub fn fill_ratio(&self) -> Option<f64> {
        let ratio = self.reference_width / self.reference_height;
        if ratio.is_finite() && ratio > 0.0 {
            Some(ratio)
        } else {
            None
        }
    }
}

/// Region of the source image that stays visible after the desktop fills the
/// screen with it, centered in the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilledRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FilledRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Shrink `(w0, h0)` to the largest size with the spec's aspect ratio that
/// fits inside the source. An invalid ratio returns the source unchanged.
pub fn fill_size(w0: f64, h0: f64, spec: &ViewportSpec) -> (f64, f64) {
    let Some(fill_ratio) = spec.fill_ratio() else {
        tracing::warn!(
            reference_width = spec.reference_width,
            reference_height = spec.reference_height,
            "invalid reference width or height, using original picture"
        );
        return (w0, h0);
    };

    let ratio = w0 / h0;
    if ratio > fill_ratio {
        // over width
        (h0 * fill_ratio, h0)
    } else if ratio < fill_ratio {
        // over height
        (w0, w0 / fill_ratio)
    } else {
        (w0, h0)
    }
}

/// The fill-size region centered in the source, with symmetric cuts on each
/// axis.
pub fn filled_rect(w0: f64, h0: f64, spec: &ViewportSpec) -> FilledRect {
    let (w, h) = fill_size(w0, h0, spec);
    FilledRect {
        x: (w0 - w) / 2.0,
        y: (h0 - h) / 2.0,
        width: w,
        height: h,
    }
}
