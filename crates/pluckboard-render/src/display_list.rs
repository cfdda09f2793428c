//! Recording surface.

use crate::painter::paint_frame;
use crate::renderer::{Layer, PaintSurface, RenderContext, Renderer};
use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use peniko::Color;

/// A recorded geometric primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(Point, Point),
    Path(BezPath),
    Rect(Rect),
    Oval(Rect),
}

/// One recorded draw call.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub layer: Layer,
    pub primitive: Primitive,
    pub stroke: Stroke,
    pub color: Color,
    pub transform: Affine,
}

/// Records draw calls instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct DisplayList {
    calls: Vec<DrawCall>,
    layer: Layer,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            layer: Layer::Grid,
        }
    }

    /// All recorded calls in paint order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls recorded in a layer.
    pub fn calls_in(&self, layer: Layer) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |call| call.layer == layer)
    }

    /// Number of calls recorded in a layer.
    pub fn count(&self, layer: Layer) -> usize {
        self.calls_in(layer).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.layer = Layer::Grid;
    }

    fn record(&mut self, primitive: Primitive, stroke: &Stroke, color: Color, transform: Affine) {
        self.calls.push(DrawCall {
            layer: self.layer,
            primitive,
            stroke: stroke.clone(),
            color,
            transform,
        });
    }
}

impl PaintSurface for DisplayList {
    fn begin_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color, transform: Affine) {
        self.record(Primitive::Line(from, to), stroke, color, transform);
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color, transform: Affine) {
        self.record(Primitive::Path(path.clone()), stroke, color, transform);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color, transform: Affine) {
        self.record(Primitive::Rect(rect), stroke, color, transform);
    }

    fn stroke_oval(&mut self, rect: Rect, stroke: &Stroke, color: Color, transform: Affine) {
        self.record(Primitive::Oval(rect), stroke, color, transform);
    }
}

impl Renderer for DisplayList {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.clear();
        paint_frame(self, ctx);
    }
}
