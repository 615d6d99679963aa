//! Viewport transform between screen pixels and the logical canvas.
//!
//! The card is always a fixed logical size ([`crate::print::CARD_BASE_W`]
//! × [`crate::print::CARD_BASE_H`]) but is displayed scaled to fit its
//! container. Block positions live in logical space, so every pointer
//! position must pass through this transform before it touches a block.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Options for the scale-to-fit computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitOptions {
    /// Minimum scale, so text stays legible on narrow containers.
    pub min_scale: f64,
    /// Maximum scale, so the card does not blow up on wide containers.
    pub max_scale: f64,
    /// Horizontal container padding subtracted before fitting.
    pub padding_x: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 1.0,
            padding_x: 0.0,
        }
    }
}

/// Compute the display scale that fits `base_width` into
/// `container_width`, clamped and rounded to three decimals so tiny
/// container jitter does not produce endless recomputation downstream.
pub fn fit_scale(container_width: f64, base_width: f64, options: FitOptions) -> f64 {
    if container_width <= 0.0 {
        return 1.0;
    }
    let available = (container_width - options.padding_x).max(0.0);
    let raw = available / base_width;
    let clamped = raw.clamp(options.min_scale, options.max_scale);
    (clamped * 1000.0).round() / 1000.0
}

/// The current display transform: where the canvas origin sits on
/// screen and at what scale the canvas is shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    /// Canvas top-left corner in screen pixels.
    pub origin: Point,
    /// Display scale (1.0 = logical pixels shown 1:1).
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Create a viewport at the given origin and scale.
    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Convert a screen point to logical canvas coordinates.
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.scale,
            (screen.y - self.origin.y) / self.scale,
        )
    }

    /// Convert a logical canvas point to screen coordinates.
    pub fn logical_to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.scale + self.origin.x,
            logical.y * self.scale + self.origin.y,
        )
    }

    /// Convert an on-screen pixel length to a logical length.
    pub fn screen_len_to_logical(&self, len: f64) -> f64 {
        len / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_viewport() {
        let vp = Viewport::default();
        let p = Point::new(100.0, 200.0);
        assert_eq!(vp.screen_to_logical(p), p);
    }

    #[test]
    fn test_screen_to_logical_with_origin_and_scale() {
        let vp = Viewport::new(Point::new(50.0, 100.0), 0.5);
        let logical = vp.screen_to_logical(Point::new(150.0, 200.0));
        assert!((logical.x - 200.0).abs() < f64::EPSILON);
        assert!((logical.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let vp = Viewport::new(Point::new(30.0, -20.0), 0.625);
        let original = Point::new(123.0, 456.0);
        let back = vp.logical_to_screen(vp.screen_to_logical(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_fit_scale_clamps() {
        let opts = FitOptions::default();
        // Narrow container hits the floor.
        assert!((fit_scale(10.0, 480.0, opts) - opts.min_scale).abs() < f64::EPSILON);
        // Wide container hits the ceiling.
        assert!((fit_scale(5000.0, 480.0, opts) - opts.max_scale).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_scale_rounds_to_three_decimals() {
        let scale = fit_scale(320.0, 480.0, FitOptions::default());
        assert!((scale - 0.667).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_scale_subtracts_padding() {
        let opts = FitOptions {
            padding_x: 80.0,
            ..FitOptions::default()
        };
        let scale = fit_scale(560.0, 480.0, opts);
        assert!((scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_scale_zero_container() {
        assert!((fit_scale(0.0, 480.0, FitOptions::default()) - 1.0).abs() < f64::EPSILON);
    }
}
