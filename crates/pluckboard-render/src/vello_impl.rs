//! Vello-based surface for GPU-accelerated rendering.

use crate::painter::paint_frame;
use crate::renderer::{PaintSurface, RenderContext, Renderer};
use kurbo::{Affine, BezPath, Ellipse, Line, Point, Rect, Stroke};
use peniko::Color;
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self { scene: Scene::new() }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl PaintSurface for VelloRenderer {
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color, transform: Affine) {
        self.scene.stroke(stroke, transform, color, None, &Line::new(from, to));
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color, transform: Affine) {
        self.scene.stroke(stroke, transform, color, None, path);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Color, transform: Affine) {
        self.scene.stroke(stroke, transform, color, None, &rect);
    }

    fn stroke_oval(&mut self, rect: Rect, stroke: &Stroke, color: Color, transform: Affine) {
        self.scene
            .stroke(stroke, transform, color, None, &Ellipse::from_rect(rect));
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        paint_frame(self, ctx);
    }
}
