use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::anchor::{AnchorResult, resolve_anchor};
use crate::color::{self, FALLBACK_BACKGROUND_COLOR, FALLBACK_TEXT_COLOR, Rgba, blend_px};
use crate::crop;
use crate::font::FontProvider;
use crate::padding;
use crate::text::{self, Alignment, ScaledFont, TextBox, TextLayout};
use crate::viewport::{FilledRect, filled_rect};
use crate::watermark::{RenderOptions, WatermarkDefinition};

const DEBUG_GUIDE_COLOR: Rgba = Rgba {
    r: 0xff,
    g: 0x00,
    b: 0x00,
    a: 0xff,
};
const DEBUG_MARKER_COLOR: Rgba = Rgba {
    r: 0xff,
    g: 0xff,
    b: 0x00,
    a: 0xaa,
};
const GUIDE_THICKNESS: i64 = 5;
const MARKER_RADIUS: f64 = 25.0;
const DASH_LEN: i64 = 10;

/// Result of one compositing call.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    /// The final wallpaper canvas.
    pub image: RgbaImage,
    /// False when no crop and no watermark altered the source, letting the
    /// caller persist the original bytes bit-exactly.
    pub changed: bool,
    /// Pre-render diagnostic snapshot, present when debug rendering is on.
    pub snapshot: Option<RgbaImage>,
}

/// Composite all configured watermarks onto the (possibly fill-cropped)
/// photo.
///
/// Painting runs in three fixed passes over the whole definition list:
/// background plates first, then text, then the optional debug overlay. A
/// later definition's background can therefore never cover an earlier
/// definition's text, regardless of list order. Definitions whose font
/// cannot be loaded are skipped individually; the call always returns a
/// canvas.
pub fn render(
    image: DynamicImage,
    definitions: &[WatermarkDefinition],
    options: &RenderOptions,
    fonts: &dyn FontProvider,
) -> RenderOutput {
    let source_dims = (image.width(), image.height());
    let mut canvas = crop::crop(image, options.crop, &options.viewport);
    let mut changed = canvas.dimensions() != source_dims;

    let snapshot = options.debug_rendering.then(|| debug_snapshot(&canvas));
    let frame = visible_frame(&canvas, options);
    tracing::debug!(count = definitions.len(), "watermarks to render");

    // layer 1: background plates
    for (idx, def) in definitions.iter().enumerate() {
        if !def.has_background() {
            continue;
        }
        let Some((_, layout)) = measure(&canvas, def, &frame, options, fonts, idx) else {
            continue;
        };
        let plate = padding::background_box(
            &layout.bounds,
            &def.background.paddings,
            def.background.h_throughout,
            def.background.v_throughout,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );
        let fill = color::resolve_color(&def.background.color, FALLBACK_BACKGROUND_COLOR);
        changed |= fill_rect(&mut canvas, &plate, fill);
    }

    // layer 2: text
    for (idx, def) in definitions.iter().enumerate() {
        let Some((font, layout)) = measure(&canvas, def, &frame, options, fonts, idx) else {
            continue;
        };
        let ink = color::resolve_color(&def.color, FALLBACK_TEXT_COLOR);
        changed |= draw_text(&mut canvas, font.as_ref(), &layout, def.alignment, ink);
    }

    // layer 3: debug overlay
    if options.debug_rendering {
        for def in definitions {
            let anchor = resolve_anchor(def.position, def.h_margin, def.v_margin, &frame);
            draw_crosshair(&mut canvas, &anchor);
        }
        outline_rect(&mut canvas, &frame, GUIDE_THICKNESS, DEBUG_GUIDE_COLOR);
        draw_center_guides(&mut canvas);
        changed = true;
    }

    RenderOutput {
        image: canvas,
        changed,
        snapshot,
    }
}

/// The part of the canvas that stays visible once the desktop fills the
/// screen. Margins and debug bounds are measured against this, never the
/// raw canvas, so overlays cannot land in a band that gets cut away.
fn visible_frame(canvas: &RgbaImage, options: &RenderOptions) -> FilledRect {
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    if options.viewport.fill_ratio().is_some() {
        filled_rect(w, h, &options.viewport)
    } else {
        FilledRect {
            x: 0.0,
            y: 0.0,
            width: w,
            height: h,
        }
    }
}

/// Load the definition's font at the density-normalized size and lay out
/// its text. Font failures skip just this definition.
fn measure(
    canvas: &RgbaImage,
    def: &WatermarkDefinition,
    frame: &FilledRect,
    options: &RenderOptions,
    fonts: &dyn FontProvider,
    idx: usize,
) -> Option<(Box<dyn ScaledFont>, TextLayout)> {
    let px = text::normalized_px(def.point, canvas.height(), options.viewport.reference_height);
    let font = match fonts.load(&def.font, px) {
        Ok(font) => font,
        Err(err) => {
            tracing::warn!(index = idx, %err, "watermark ignored due to font loading error");
            return None;
        }
    };
    let anchor = resolve_anchor(def.position, def.h_margin, def.v_margin, frame);
    let layout = text::layout(
        font.as_ref(),
        &def.text,
        &anchor,
        def.linespace,
        def.wrap_width,
        f64::from(canvas.width()),
        f64::from(canvas.height()),
    );
    Some((font, layout))
}

fn draw_text(
    canvas: &mut RgbaImage,
    font: &dyn ScaledFont,
    layout: &TextLayout,
    alignment: Alignment,
    ink: Rgba,
) -> bool {
    let mut painted = false;
    for (row, line) in layout.lines.iter().enumerate() {
        let top = layout.bounds.y + row as f64 * layout.line_advance;
        let mut cursor = text::line_x(alignment, &layout.bounds, font.line_width(line));
        for ch in line.chars() {
            let glyph = font.rasterize(ch);
            let gx = cursor + f64::from(glyph.xmin);
            let gy = top + font.ascent() - f64::from(glyph.height as i32 + glyph.ymin);
            painted |= blit_glyph(canvas, &glyph, gx, gy, ink);
            cursor += f64::from(glyph.advance);
        }
    }
    painted
}

fn blit_glyph(canvas: &mut RgbaImage, glyph: &text::Glyph, gx: f64, gy: f64, ink: Rgba) -> bool {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let (gx, gy) = (gx.round() as i64, gy.round() as i64);
    let mut painted = false;
    for row in 0..glyph.height {
        for col in 0..glyph.width {
            let coverage = glyph.coverage[row * glyph.width + col];
            if coverage == 0 {
                continue;
            }
            let x = gx + col as i64;
            let y = gy + row as i64;
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            blend_px(canvas.get_pixel_mut(x as u32, y as u32), ink, coverage);
            painted = true;
        }
    }
    painted
}

fn fill_rect(canvas: &mut RgbaImage, rect: &TextBox, fill: Rgba) -> bool {
    if fill.a == 0 {
        return false;
    }
    let (x0, y0, x1, y1) = clamp_rect(canvas, rect);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_px(canvas.get_pixel_mut(x, y), fill, 255);
        }
    }
    x1 > x0 && y1 > y0
}

fn clamp_rect(canvas: &RgbaImage, rect: &TextBox) -> (u32, u32, u32, u32) {
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let x1 = ((rect.x + rect.width).round().max(0.0) as u32).min(canvas.width());
    let y1 = ((rect.y + rect.height).round().max(0.0) as u32).min(canvas.height());
    (x0.min(x1), y0.min(y1), x1, y1)
}

/// Clone of the pre-render canvas with corner markers and a bounds outline,
/// for diagnosing desktop-side cropping.
fn debug_snapshot(canvas: &RgbaImage) -> RgbaImage {
    let mut snap = canvas.clone();
    let (w, h) = (f64::from(snap.width()), f64::from(snap.height()));
    fill_circle(&mut snap, 0.0, 0.0, MARKER_RADIUS, DEBUG_MARKER_COLOR);
    fill_circle(&mut snap, w - 1.0, h - 1.0, MARKER_RADIUS, DEBUG_MARKER_COLOR);
    let bounds = FilledRect {
        x: 0.0,
        y: 0.0,
        width: w,
        height: h,
    };
    outline_rect(&mut snap, &bounds, GUIDE_THICKNESS, DEBUG_MARKER_COLOR);
    snap
}

fn draw_crosshair(canvas: &mut RgbaImage, anchor: &AnchorResult) {
    let r = MARKER_RADIUS;
    fill_rect(
        canvas,
        &TextBox {
            x: anchor.x - r,
            y: anchor.y - 1.0,
            width: 2.0 * r,
            height: 3.0,
        },
        DEBUG_GUIDE_COLOR,
    );
    fill_rect(
        canvas,
        &TextBox {
            x: anchor.x - 1.0,
            y: anchor.y - r,
            width: 3.0,
            height: 2.0 * r,
        },
        DEBUG_GUIDE_COLOR,
    );
}

fn outline_rect(canvas: &mut RgbaImage, rect: &FilledRect, thickness: i64, stroke: Rgba) {
    let t = thickness as f64;
    let edges = [
        TextBox {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: t,
        },
        TextBox {
            x: rect.x,
            y: rect.bottom() - t,
            width: rect.width,
            height: t,
        },
        TextBox {
            x: rect.x,
            y: rect.y,
            width: t,
            height: rect.height,
        },
        TextBox {
            x: rect.right() - t,
            y: rect.y,
            width: t,
            height: rect.height,
        },
    ];
    for edge in &edges {
        fill_rect(canvas, edge, stroke);
    }
}

/// Dashed horizontal and vertical center lines.
fn draw_center_guides(canvas: &mut RgbaImage) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let (cx, cy) = (w / 2, h / 2);
    for x in 0..w {
        if (x / DASH_LEN) % 2 == 0 {
            blend_px(
                canvas.get_pixel_mut(x as u32, cy as u32),
                DEBUG_GUIDE_COLOR,
                255,
            );
        }
    }
    for y in 0..h {
        if (y / DASH_LEN) % 2 == 0 {
            blend_px(
                canvas.get_pixel_mut(cx as u32, y as u32),
                DEBUG_GUIDE_COLOR,
                255,
            );
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, cx: f64, cy: f64, radius: f64, fill: Rgba) {
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let r = radius.ceil() as i64;
    for dy in -r..=r {
        for dx in -r..=r {
            let x = cx as i64 + dx;
            let y = cy as i64 + dy;
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            if (dx * dx + dy * dy) as f64 <= radius * radius {
                blend_px(canvas.get_pixel_mut(x as u32, y as u32), fill, 255);
            }
        }
    }
}
