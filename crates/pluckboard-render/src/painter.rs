//! Frame painter shared by every surface.

use crate::renderer::{Layer, PaintSurface, RenderContext};
use kurbo::{Affine, Cap, Join, Point, Rect, Stroke};
use peniko::Color;
use pluckboard_core::shapes::{CanvasElement, ElementKind};

/// Grid line width in world units.
const GRID_LINE_WIDTH: f64 = 0.5;

/// Upper bound on grid lines per axis; denser grids are skipped.
const MAX_GRID_LINES: f64 = 2000.0;

/// Stroke with round caps and joins.
pub fn round_stroke(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

/// Paint one frame: grid, elements, the live stroke, then replay copies.
pub fn paint_frame<S: PaintSurface + ?Sized>(surface: &mut S, ctx: &RenderContext) {
    let canvas = ctx.canvas;
    let camera = canvas.camera();
    let camera_transform = camera.transform();
    let viewport = Rect::from_origin_size(Point::ZERO, ctx.viewport_size);

    surface.begin_layer(Layer::Grid);
    paint_grid(surface, viewport, camera_transform, ctx.grid_spacing, ctx.grid_color);

    surface.begin_layer(Layer::Elements);
    for element in canvas.elements() {
        paint_element(surface, element, camera_transform);
    }

    surface.begin_layer(Layer::LiveStroke);
    if let Some(path) = canvas.in_progress_path() {
        let style = canvas.current_style();
        // Divided by zoom so the on-screen thickness stays constant.
        let stroke = round_stroke(style.stroke_width / camera.zoom);
        surface.stroke_path(path, &stroke, style.stroke(), camera_transform);
    }

    surface.begin_layer(Layer::Replay);
    for index in 0..canvas.strokes().len() {
        let Some(copy) = canvas.replay().get(index) else {
            continue;
        };
        let color = copy.style.stroke().multiply_alpha(copy.alpha);
        surface.stroke_path(
            &copy.path,
            &round_stroke(copy.style.stroke_width),
            color,
            copy.transform(),
        );
    }
}

fn paint_element<S: PaintSurface + ?Sized>(surface: &mut S, element: &CanvasElement, transform: Affine) {
    let color = element.style.stroke();
    let width = element.style.stroke_width;
    match element.kind {
        ElementKind::Path => surface.stroke_path(&element.path, &round_stroke(width), color, transform),
        ElementKind::Rectangle => {
            surface.stroke_rect(element.bounds(), &Stroke::new(width), color, transform)
        }
        ElementKind::Oval => surface.stroke_oval(element.bounds(), &Stroke::new(width), color, transform),
    }
}

/// Calculate grid bounds (world units) covering the viewport.
fn grid_bounds(viewport: Rect, transform: Affine, grid_size: f64) -> Rect {
    let inv = transform.inverse();
    let world_tl = inv * Point::new(viewport.x0, viewport.y0);
    let world_br = inv * Point::new(viewport.x1, viewport.y1);

    Rect::new(
        (world_tl.x / grid_size).floor() * grid_size,
        (world_tl.y / grid_size).floor() * grid_size,
        (world_br.x / grid_size).ceil() * grid_size,
        (world_br.y / grid_size).ceil() * grid_size,
    )
}

fn paint_grid<S: PaintSurface + ?Sized>(
    surface: &mut S,
    viewport: Rect,
    transform: Affine,
    grid_size: f64,
    color: Color,
) {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return;
    }
    let bounds = grid_bounds(viewport, transform, grid_size);
    if !(bounds.x0.is_finite() && bounds.y0.is_finite() && bounds.x1.is_finite() && bounds.y1.is_finite()) {
        return;
    }
    // Far from the origin the spacing falls below float precision.
    if bounds.x0 + grid_size == bounds.x0 || bounds.y0 + grid_size == bounds.y0 {
        log::debug!("Grid spacing below precision at this offset, skipping");
        return;
    }
    let cols = (bounds.width() / grid_size).round();
    let rows = (bounds.height() / grid_size).round();
    if cols > MAX_GRID_LINES || rows > MAX_GRID_LINES {
        log::debug!("Grid too dense at this zoom, skipping");
        return;
    }

    let stroke = Stroke::new(GRID_LINE_WIDTH);

    // Vertical lines
    for i in 0..=cols as usize {
        let x = bounds.x0 + i as f64 * grid_size;
        surface.stroke_line(Point::new(x, bounds.y0), Point::new(x, bounds.y1), &stroke, color, transform);
    }

    // Horizontal lines
    for i in 0..=rows as usize {
        let y = bounds.y0 + i as f64 * grid_size;
        surface.stroke_line(Point::new(bounds.x0, y), Point::new(bounds.x1, y), &stroke, color, transform);
    }
}
