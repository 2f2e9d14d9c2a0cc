//! Wallpaper watermark compositing.
//!
//! This crate turns a decoded photograph into a desktop-ready wallpaper in
//! one synchronous pass:
//!
//! 1. Fill-crop the photo to a reference aspect ratio ([`crop`],
//!    [`viewport`]) so the desktop never letterboxes it.
//! 2. Paint configured text overlays ([`compositor::render`]) in strict
//!    pass order: all background plates, then all text, then an optional
//!    debug overlay. Overlapping overlays can never cover each other's
//!    text with a plate.
//!
//! Downloading photos, choosing them, persisting files, and setting the
//! OS wallpaper are the embedding application's job; so is mapping a font
//! name to a file, which reaches this crate through the
//! [`font::FontResolver`] contract.
//!
//! Configuration problems (unknown position or alignment tokens, malformed
//! colors, degenerate reference dimensions) degrade to documented defaults
//! with a warning. A watermark whose font fails to load is skipped on its
//! own. Nothing in this crate aborts a render: a wallpaper missing one
//! watermark beats no wallpaper.
#![forbid(unsafe_code)]

pub mod anchor;
pub mod color;
pub mod compositor;
pub mod crop;
pub mod error;
pub mod font;
pub mod padding;
pub mod text;
pub mod viewport;
pub mod watermark;

pub use anchor::{AnchorResult, Position, resolve_anchor};
pub use compositor::{RenderOutput, render};
pub use crop::CropMode;
pub use error::{WallmarkError, WallmarkResult};
pub use font::{DirectFontResolver, FontProvider, FontResolver, FontdueProvider};
pub use text::{Alignment, ScaledFont, TextBox};
pub use viewport::ViewportSpec;
pub use watermark::{BackgroundSpec, RenderOptions, WatermarkDefinition};
