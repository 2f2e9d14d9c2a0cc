use crate::text::TextBox;

/// Expand a 0..4 element padding list into `[top, right, bottom, left]`
/// following CSS shorthand rules, then convert fractional values to pixels.
///
/// A value with magnitude below 1 scales against the box dimension on its
/// axis: top/bottom against the box height, left/right against the box
/// width. Longer lists ignore everything past the fourth value.
pub fn normalize(paddings: &[f64], box_width: f64, box_height: f64) -> [f64; 4] {
    if paddings.len() > 4 {
        tracing::warn!(count = paddings.len(), "too many padding values, extras ignored");
    }
    let mut out = match paddings {
        [] => [0.0; 4],
        [all] => [*all; 4],
        [v, h] => [*v, *h, *v, *h],
        [t, h, b] => [*t, *h, *b, *h],
        [t, r, b, l, ..] => [*t, *r, *b, *l],
    };
    for (idx, padding) in out.iter_mut().enumerate() {
        if padding.abs() < 1.0 {
            *padding *= if idx.is_multiple_of(2) {
                box_height
            } else {
                box_width
            };
        }
    }
    out
}

/// Grow a text box into its background plate, clamped to the canvas.
///
/// A throughout flag replaces the computed padding on that axis and spans
/// the full canvas instead.
pub fn background_box(
    text_box: &TextBox,
    paddings: &[f64],
    throughout_h: bool,
    throughout_v: bool,
    canvas_width: f64,
    canvas_height: f64,
) -> TextBox {
    let [top, right, bottom, left] = normalize(paddings, text_box.width, text_box.height);

    let (x0, x1) = if throughout_h {
        (0.0, canvas_width)
    } else {
        (
            (text_box.x - left).max(0.0),
            (text_box.x + text_box.width + right).min(canvas_width),
        )
    };
    let (y0, y1) = if throughout_v {
        (0.0, canvas_height)
    } else {
        (
            (text_box.y - top).max(0.0),
            (text_box.y + text_box.height + bottom).min(canvas_height),
        )
    };

    TextBox {
        x: x0,
        y: y0,
        width: (x1 - x0).max(0.0),
        height: (y1 - y0).max(0.0),
    }
}
