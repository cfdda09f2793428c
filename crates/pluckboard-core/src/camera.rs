//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// The offset is stored in world units, so the mapping is
/// `screen = zoom * (world + offset)`. Pan deltas arrive in screen pixels and
/// are divided by the current zoom before being accumulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in world units.
    pub offset: Vec2,
    /// Current zoom level (1.0 = identity).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera at identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with the given zoom limits.
    ///
    /// Inverted limits are swapped; non-finite or non-positive limits fall
    /// back to the defaults.
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let (min_zoom, max_zoom) = normalized_limits(min_zoom, max_zoom);
        Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.offset)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.offset) * Affine::scale(1.0 / self.zoom)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Multiply the zoom by `ratio`, clamped to the zoom limits.
    ///
    /// Returns false when the ratio is not a usable scale factor.
    pub fn zoom_by(&mut self, ratio: f64) -> bool {
        if !ratio.is_finite() || ratio <= 0.0 {
            return false;
        }
        // Limits are public fields, so re-normalize rather than trust them.
        let (min_zoom, max_zoom) = normalized_limits(self.min_zoom, self.max_zoom);
        self.zoom = (self.zoom * ratio).clamp(min_zoom, max_zoom);
        true
    }

    /// Pan by a delta in screen pixels, expressed in the current zoom's frame.
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.offset += screen_delta / self.zoom;
    }

    /// Apply one incremental two-finger transform: zoom first, then pan
    /// relative to the post-zoom scale.
    pub fn apply_gesture(&mut self, pan: Vec2, zoom: f64) {
        if !self.zoom_by(zoom) {
            log::warn!("Ignoring unusable zoom ratio {zoom}");
        }
        self.pan(pan);
    }
}

/// Order a pair of zoom limits so `clamp` accepts them.
fn normalized_limits(min_zoom: f64, max_zoom: f64) -> (f64, f64) {
    let (lo, hi) = if min_zoom <= max_zoom {
        (min_zoom, max_zoom)
    } else {
        (max_zoom, min_zoom)
    };
    if lo.is_finite() && hi.is_finite() && lo > 0.0 {
        (lo, hi)
    } else {
        let defaults = Camera::default();
        (defaults.min_zoom, defaults.max_zoom)
    }
}
