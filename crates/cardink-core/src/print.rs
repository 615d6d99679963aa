//! Print geometry for the card canvas.
//!
//! The physical card size in millimeters is the source of truth; the
//! logical editor canvas is derived from it. Blocks store positions in
//! this logical space and export always renders at this resolution, no
//! matter what scale the card is displayed at.

use kurbo::Size;

/// Physical card width in millimeters (standard business card).
pub const MM_W: f64 = 85.6;
/// Physical card height in millimeters.
pub const MM_H: f64 = 53.98;

/// Bleed margin in millimeters.
pub const BLEED_MM: f64 = 3.0;
/// Safe-area inset in millimeters.
pub const SAFE_MM: f64 = 3.0;

/// Logical canvas width in pixels. The width is the anchor; the height
/// must always be derived from the mm aspect ratio.
pub const CARD_BASE_W: f64 = 480.0;

/// Logical canvas height in pixels, rounded from `CARD_BASE_W * MM_H / MM_W`.
pub const CARD_BASE_H: f64 = 303.0;

/// Pixels per millimeter at the logical canvas size.
pub const PX_PER_MM: f64 = CARD_BASE_W / MM_W;

/// Bleed margin in logical pixels.
pub fn bleed_px() -> f64 {
    BLEED_MM * PX_PER_MM
}

/// Safe-area inset in logical pixels.
pub fn safe_px() -> f64 {
    SAFE_MM * PX_PER_MM
}

/// Finished (trimmed) card size in logical pixels.
pub fn finish_size() -> Size {
    Size::new(CARD_BASE_W, CARD_BASE_H)
}

/// Canvas size including bleed on all edges.
pub fn bleed_size() -> Size {
    Size::new(CARD_BASE_W + bleed_px() * 2.0, CARD_BASE_H + bleed_px() * 2.0)
}
