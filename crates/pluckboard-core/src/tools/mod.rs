//! Tool system for the canvas.

use crate::shapes::{PluckablePath, ShapeStyle};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Path,
    Rectangle,
    Oval,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub const ALL: [ToolKind; 3] = [ToolKind::Path, ToolKind::Rectangle, ToolKind::Oval];

    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Path => "Path",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Oval => "Oval",
        }
    }

    /// Whether drag gestures draw with this tool.
    ///
    /// Rectangle and oval select a mode but do not size shapes from drags yet.
    pub fn draws_on_drag(self) -> bool {
        matches!(self, ToolKind::Path)
    }
}

/// Manages the current tool and the in-progress path.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current style to apply to new strokes.
    pub current_style: ShapeStyle,
    /// Path being drawn, in world coordinates.
    in_progress: BezPath,
    /// Whether a draw gesture is active.
    drawing: bool,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager drawing with the given style.
    pub fn with_style(style: ShapeStyle) -> Self {
        Self {
            current_style: style,
            ..Self::default()
        }
    }

    /// Set the current tool, dropping any in-progress path.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a draw interaction at a world point.
    ///
    /// Returns false when the current tool ignores drags.
    pub fn begin(&mut self, point: Point) -> bool {
        if !self.current_tool.draws_on_drag() {
            return false;
        }
        self.in_progress = BezPath::new();
        self.in_progress.move_to(point);
        self.drawing = true;
        true
    }

    /// Extend the in-progress path with a line segment to `point`.
    pub fn update(&mut self, point: Point) {
        if self.drawing {
            self.in_progress.line_to(point);
        }
    }

    /// End the interaction, returning the finalized stroke if its bounds are
    /// non-empty.
    pub fn end(&mut self) -> Option<PluckablePath> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let path = std::mem::take(&mut self.in_progress);
        PluckablePath::finalize(path, self.current_style)
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.drawing = false;
        self.in_progress = BezPath::new();
    }

    /// Check if a draw interaction is active.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The path being drawn, if a draw interaction is active.
    pub fn in_progress_path(&self) -> Option<&BezPath> {
        self.drawing.then_some(&self.in_progress)
    }
}
