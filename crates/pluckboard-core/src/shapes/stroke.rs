//! Completed freehand stroke.

use super::ShapeStyle;
use kurbo::{BezPath, Rect, Shape as _};
use serde::{Deserialize, Serialize};

/// A finalized freehand path with a fixed color and width.
///
/// Geometry is stored in world coordinates as move-to/line-to segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluckablePath {
    /// Path segments.
    pub path: BezPath,
    /// Style captured when the stroke was completed.
    pub style: ShapeStyle,
}

impl PluckablePath {
    /// Finalize a path, returning `None` when its bounding box has no area.
    pub fn finalize(path: BezPath, style: ShapeStyle) -> Option<Self> {
        if path.bounding_box().is_zero_area() {
            return None;
        }
        Some(Self { path, style })
    }

    /// Axis-aligned bounds of the path.
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }
}
