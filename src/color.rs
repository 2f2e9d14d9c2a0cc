use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color as configured for text and background plates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Fallback text color, applied when a configured color fails to parse.
pub const FALLBACK_TEXT_COLOR: Rgba = Rgba {
    r: 0x22,
    g: 0x22,
    b: 0x22,
    a: 0xff,
};

/// Fallback background plate color (translucent light gray).
pub const FALLBACK_BACKGROUND_COLOR: Rgba = Rgba {
    r: 0xee,
    g: 0xee,
    b: 0xee,
    a: 0x77,
};

impl Rgba {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Parse `RRGGBB` or `RRGGBBAA` hex (case-insensitive, optional leading `#`).
pub fn parse_hex(s: &str) -> Result<Rgba, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(Rgba::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        )),
        8 => Ok(Rgba::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be RRGGBB or RRGGBBAA (case-insensitive)".to_owned()),
    }
}

/// Parse a configured color, falling back (with a warning) when it is
/// malformed. An empty string is treated as "not configured" and falls back
/// silently.
pub fn resolve_color(configured: &str, fallback: Rgba) -> Rgba {
    if configured.is_empty() {
        return fallback;
    }
    match parse_hex(configured) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(color = configured, %err, "invalid color, using fallback");
            fallback
        }
    }
}

/// Source-over blend of a straight-alpha color onto one canvas pixel, with an
/// extra coverage weight (glyph antialiasing) in 0..=255.
pub fn blend_px(dst: &mut image::Rgba<u8>, src: Rgba, coverage: u8) {
    let sa = mul_div255(u16::from(src.a), u16::from(coverage));
    if sa == 0 {
        return;
    }
    let inv = 255u16 - u16::from(sa);

    let sc = [src.r, src.g, src.b];
    for i in 0..3 {
        let over = mul_div255(u16::from(sc[i]), u16::from(sa));
        let under = mul_div255(u16::from(dst.0[i]), inv);
        dst.0[i] = over.saturating_add(under);
    }
    dst.0[3] = sa.saturating_add(mul_div255(u16::from(dst.0[3]), inv));
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
