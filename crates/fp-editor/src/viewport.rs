//! Screen ↔ canvas coordinate mapping.
//!
//! The host renderer owns pan and zoom; it reports them here so drops and
//! pointer drags can be projected into canvas space.

use fp_core::{Affine, Point, Vec2};

/// Canvas → screen transform: `screen = canvas * zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan: Vec2,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(pan: Vec2, zoom: f64) -> Self {
        Self { pan, zoom }
    }

    /// The canvas → screen affine.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Inverse-project a screen point into canvas space.
    ///
    /// A degenerate zoom (zero or non-finite) is treated as 1.0.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        let zoom = if self.zoom.is_finite() && self.zoom != 0.0 {
            self.zoom
        } else {
            1.0
        };
        Viewport::new(self.pan, zoom).transform().inverse() * screen
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.transform() * canvas
    }
}
