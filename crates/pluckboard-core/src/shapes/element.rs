//! Tagged canvas element.

use super::ShapeStyle;
use kurbo::{BezPath, Rect, Shape as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// How an element's stored path is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// The path itself, stroked.
    Path,
    /// Outline of the path's bounding box.
    Rectangle,
    /// Oval inscribed in the path's bounding box.
    Oval,
}

/// A drawable item tagged as path, rectangle or oval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasElement {
    pub(crate) id: ElementId,
    /// Element tag.
    pub kind: ElementKind,
    /// Stored geometry in world coordinates.
    pub path: BezPath,
    /// Style properties.
    pub style: ShapeStyle,
}

impl CanvasElement {
    /// Create a new element.
    pub fn new(kind: ElementKind, path: BezPath, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            path,
            style,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Bounding box of the stored path; rectangles and ovals are drawn from it.
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }
}
