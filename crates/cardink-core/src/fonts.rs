//! Font catalog for text blocks.
//!
//! The engine only carries references into this catalog; actual glyph
//! loading and layout live outside the core. Unknown keys fall back to
//! the default family rather than erroring.

use serde::{Deserialize, Serialize};

/// Minimum allowed font size for a text block.
pub const FONT_SIZE_MIN: u32 = 8;
/// Maximum allowed font size for a text block.
pub const FONT_SIZE_MAX: u32 = 72;

/// Clamp a candidate font size into the allowed range.
pub fn clamp_font_size(size: i64) -> u32 {
    size.clamp(FONT_SIZE_MIN as i64, FONT_SIZE_MAX as i64) as u32
}

/// Reference into the font catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKey {
    /// Gothic sans-serif (default).
    #[default]
    Sans,
    /// Rounded gothic.
    Maru,
    /// Mincho serif.
    Serif,
}

impl FontKey {
    /// Display label for UI.
    pub fn label(&self) -> &'static str {
        match self {
            FontKey::Sans => "ゴシック",
            FontKey::Maru => "丸ゴシック",
            FontKey::Serif => "明朝",
        }
    }

    /// CSS-style font family stack for the renderer.
    pub fn css_family(&self) -> &'static str {
        match self {
            FontKey::Sans => "'Noto Sans JP', system-ui, sans-serif",
            FontKey::Maru => "'Zen Maru Gothic', system-ui, sans-serif",
            FontKey::Serif => "'Noto Serif JP', serif",
        }
    }

    /// All catalog entries.
    pub fn all() -> &'static [FontKey] {
        &[FontKey::Sans, FontKey::Maru, FontKey::Serif]
    }

    /// Resolve a stored key string, falling back to the default family
    /// for keys the catalog no longer knows.
    pub fn from_key(key: &str) -> Self {
        match key {
            "sans" => FontKey::Sans,
            "maru" => FontKey::Maru,
            "serif" => FontKey::Serif,
            _ => FontKey::default(),
        }
    }
}
