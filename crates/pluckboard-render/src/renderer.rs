//! Renderer trait abstraction.

use kurbo::{Affine, BezPath, Point, Rect, Size, Stroke};
use peniko::Color;
use pluckboard_core::canvas::Canvas;
use pluckboard_core::config::CanvasConfig;

/// Paint layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Background grid.
    Grid,
    /// Canvas elements.
    Elements,
    /// The stroke being drawn.
    LiveStroke,
    /// Replay copies of completed strokes.
    Replay,
}

/// Frame-scoped drawing target.
///
/// Shapes are given in the coordinate space selected by `transform`; stroke
/// widths are in that same space.
pub trait PaintSurface {
    /// Marks the start of a layer. Everything painted afterwards belongs to it.
    fn begin_layer(&mut self, _layer: Layer) {}

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color, transform: Affine);

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color, transform: Affine);

    /// Outline a rectangle (never filled).
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color, transform: Affine);

    /// Outline the oval inscribed in `rect` (never filled).
    fn stroke_oval(&mut self, rect: Rect, stroke: &Stroke, color: Color, transform: Affine);
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    /// Grid spacing in world units.
    pub grid_spacing: f64,
    /// Grid line color.
    pub grid_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context with default grid settings.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        let config = CanvasConfig::default();
        Self {
            canvas,
            viewport_size,
            grid_spacing: config.grid_spacing,
            grid_color: config.grid_color.into(),
        }
    }

    /// Take grid settings from a configuration.
    pub fn with_config(mut self, config: &CanvasConfig) -> Self {
        self.grid_spacing = config.grid_spacing;
        self.grid_color = config.grid_color.into();
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the draw commands for a frame.
    ///
    /// Called once per frame; previous frame content is discarded.
    fn build_scene(&mut self, ctx: &RenderContext);
}
