//! Canvas scene state and the controller that mutates it.

use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::input::{GestureEvent, GestureRecognizer, PointerEvent};
use crate::replay::ReplayLayer;
use crate::shapes::{CanvasElement, PluckablePath, SerializableColor, ShapeStyle};
use crate::toolbar::ToolbarAction;
use crate::tools::{ToolKind, ToolManager};
use kurbo::{BezPath, Point, Vec2};
use thiserror::Error;

/// Save errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Saving is not implemented")]
    NotImplemented,
    #[error("Save failed: {0}")]
    Failed(String),
}

/// Read-only view of the drawable content handed to a save handler.
#[derive(Debug, Clone, Copy)]
pub struct CanvasSnapshot<'a> {
    pub strokes: &'a [PluckablePath],
    pub elements: &'a [CanvasElement],
}

/// Receiver for the toolbar's save action.
pub trait SaveHandler {
    fn save(&mut self, snapshot: CanvasSnapshot<'_>) -> Result<(), SaveError>;
}

/// Runtime canvas state.
///
/// All mutation goes through the methods below; renderers read it by
/// reference.
#[derive(Debug, Clone)]
pub struct Canvas {
    camera: Camera,
    tool_manager: ToolManager,
    /// Completed freehand strokes, in completion order.
    strokes: Vec<PluckablePath>,
    /// Tagged elements, back to front.
    elements: Vec<CanvasElement>,
    /// Replay copies keyed by stroke index.
    replay: ReplayLayer,
    gestures: GestureRecognizer,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&CanvasConfig::default())
    }

    /// Create a canvas from a configuration.
    pub fn with_config(config: &CanvasConfig) -> Self {
        Self {
            camera: Camera::with_limits(config.min_zoom, config.max_zoom),
            tool_manager: ToolManager::with_style(ShapeStyle::new(
                config.default_color,
                config.default_stroke_width,
            )),
            strokes: Vec::new(),
            elements: Vec::new(),
            replay: ReplayLayer::new(config.replay_alpha),
            gestures: GestureRecognizer::new(config.touch_slop),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn strokes(&self) -> &[PluckablePath] {
        &self.strokes
    }

    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    pub fn replay(&self) -> &ReplayLayer {
        &self.replay
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    pub fn current_style(&self) -> ShapeStyle {
        self.tool_manager.current_style
    }

    /// Whether a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        self.tool_manager.is_drawing()
    }

    /// The stroke being drawn, in world coordinates.
    pub fn in_progress_path(&self) -> Option<&BezPath> {
        self.tool_manager.in_progress_path()
    }

    /// Feed a raw pointer event through gesture recognition.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        for gesture in self.gestures.process(event) {
            self.apply_gesture(gesture);
        }
    }

    /// Apply a recognized gesture.
    pub fn apply_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Transform { pan, zoom, .. } => self.apply_transform(pan, zoom),
            GestureEvent::DragStart { position } => self.begin_stroke(position),
            GestureEvent::DragMove { position, .. } => self.extend_stroke(position),
            GestureEvent::DragEnd => {
                self.end_stroke();
            }
            GestureEvent::DragCancel => self.cancel_stroke(),
            GestureEvent::Tap { position } => {
                log::trace!("Tap at {position:?}");
            }
        }
    }

    /// Apply an incremental zoom ratio and screen-space pan.
    pub fn apply_transform(&mut self, pan: Vec2, zoom: f64) {
        self.camera.apply_gesture(pan, zoom);
    }

    /// Start a stroke at a screen position.
    pub fn begin_stroke(&mut self, screen_point: Point) {
        let world = self.camera.screen_to_world(screen_point);
        if self.tool_manager.begin(world) {
            log::debug!("Stroke started at {world:?}");
        } else {
            log::debug!("{} tool ignores drags", self.current_tool().name());
        }
    }

    /// Extend the stroke to a screen position.
    pub fn extend_stroke(&mut self, screen_point: Point) {
        let world = self.camera.screen_to_world(screen_point);
        self.tool_manager.update(world);
    }

    /// Finish the stroke. Returns true if a stroke was added.
    pub fn end_stroke(&mut self) -> bool {
        if !self.tool_manager.is_drawing() {
            return false;
        }
        match self.tool_manager.end() {
            Some(stroke) => {
                self.strokes.push(stroke);
                self.replay.sync(&self.strokes);
                log::debug!("Stroke {} completed", self.strokes.len() - 1);
                true
            }
            None => {
                log::debug!("Discarding stroke with empty bounds");
                false
            }
        }
    }

    /// Drop the stroke being drawn.
    pub fn cancel_stroke(&mut self) {
        self.tool_manager.cancel();
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.tool_manager.current_style.stroke_color = color;
    }

    /// Set the stroke width for new strokes; non-positive widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.tool_manager.current_style.stroke_width = width;
        } else {
            log::warn!("Ignoring stroke width {width}");
        }
    }

    /// Append an element on top of the existing ones.
    pub fn push_element(&mut self, element: CanvasElement) {
        self.elements.push(element);
    }

    /// Remove every stroke, element and replay copy.
    pub fn clear(&mut self) {
        log::info!(
            "Clearing canvas ({} strokes, {} elements)",
            self.strokes.len(),
            self.elements.len()
        );
        self.tool_manager.cancel();
        self.strokes.clear();
        self.elements.clear();
        self.replay.clear();
    }

    /// Save without a handler. Always reports that saving is unavailable.
    pub fn save(&self) -> Result<(), SaveError> {
        log::warn!("Save requested but no save handler is configured");
        Err(SaveError::NotImplemented)
    }

    /// Hand the drawable content to a save handler.
    pub fn save_with(&self, handler: &mut impl SaveHandler) -> Result<(), SaveError> {
        handler.save(CanvasSnapshot {
            strokes: &self.strokes,
            elements: &self.elements,
        })
    }

    /// Apply a toolbar action. Only `Save` can fail.
    pub fn apply_toolbar_action(&mut self, action: ToolbarAction) -> Result<(), SaveError> {
        match action {
            ToolbarAction::SelectTool(tool) => self.set_tool(tool),
            ToolbarAction::SetColor(color) => self.set_color(color),
            ToolbarAction::SetStrokeWidth(width) => self.set_stroke_width(width),
            ToolbarAction::Clear => self.clear(),
            ToolbarAction::Save => return self.save(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ElementKind;

    fn drag(canvas: &mut Canvas, points: &[(f64, f64)]) {
        let (first, rest) = points.split_first().unwrap();
        canvas.handle_pointer_event(PointerEvent::Down {
            id: 0,
            position: Point::new(first.0, first.1),
        });
        for &(x, y) in rest {
            canvas.handle_pointer_event(PointerEvent::Move {
                id: 0,
                position: Point::new(x, y),
            });
        }
        let last = points.last().unwrap();
        canvas.handle_pointer_event(PointerEvent::Up {
            id: 0,
            position: Point::new(last.0, last.1),
        });
    }

    #[test]
    fn test_drag_appends_one_stroke() {
        let mut canvas = Canvas::new();
        canvas.set_color(SerializableColor::new(255, 0, 0, 255));
        canvas.set_stroke_width(7.0);

        drag(&mut canvas, &[(10.0, 10.0), (40.0, 30.0), (60.0, 80.0)]);

        assert_eq!(canvas.strokes().len(), 1);
        let stroke = &canvas.strokes()[0];
        assert_eq!(stroke.style.stroke_color, SerializableColor::new(255, 0, 0, 255));
        assert!((stroke.style.stroke_width - 7.0).abs() < f64::EPSILON);
        assert!(!canvas.is_drawing());
        assert!(canvas.in_progress_path().is_none());
    }

    #[test]
    fn test_press_release_appends_nothing() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(10.0, 10.0)]);
        assert!(canvas.strokes().is_empty());

        // Same result with drag events applied directly.
        canvas.begin_stroke(Point::new(5.0, 5.0));
        assert!(!canvas.end_stroke());
        assert!(canvas.strokes().is_empty());
        assert!(canvas.replay().is_empty());
    }

    #[test]
    fn test_replay_indices_match_strokes() {
        let mut canvas = Canvas::new();
        for i in 0..4 {
            let x = i as f64 * 100.0;
            drag(&mut canvas, &[(x, 0.0), (x + 30.0, 50.0)]);
        }
        assert_eq!(canvas.strokes().len(), 4);
        assert_eq!(canvas.replay().indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(0.0, 0.0), (30.0, 50.0)]);
        canvas.push_element(CanvasElement::new(
            ElementKind::Rectangle,
            BezPath::new(),
            ShapeStyle::default(),
        ));

        canvas.apply_toolbar_action(ToolbarAction::Clear).unwrap();

        assert!(canvas.strokes().is_empty());
        assert!(canvas.elements().is_empty());
        assert!(canvas.replay().is_empty());
    }

    #[test]
    fn test_zoom_then_pan() {
        let mut canvas = Canvas::new();
        canvas.apply_gesture(GestureEvent::Transform {
            centroid: Point::ZERO,
            pan: Vec2::ZERO,
            zoom: 2.0,
            rotation: 0.0,
        });
        canvas.apply_gesture(GestureEvent::Transform {
            centroid: Point::ZERO,
            pan: Vec2::new(10.0, 10.0),
            zoom: 1.0,
            rotation: 0.0,
        });
        assert_eq!(canvas.camera().offset, Vec2::new(5.0, 5.0));
        assert!((canvas.camera().zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_zoom_limits_do_not_panic() {
        let config = CanvasConfig {
            min_zoom: 4.0,
            max_zoom: 2.0,
            ..CanvasConfig::default()
        };
        let mut canvas = Canvas::with_config(&config);
        canvas.apply_transform(Vec2::ZERO, 1.5);
        assert!((canvas.camera().zoom - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stroke_points_are_world_coordinates() {
        let mut canvas = Canvas::new();
        canvas.apply_transform(Vec2::ZERO, 2.0);
        canvas.begin_stroke(Point::new(20.0, 20.0));
        canvas.extend_stroke(Point::new(60.0, 100.0));
        assert!(canvas.end_stroke());

        let bounds = canvas.strokes()[0].bounds();
        assert_eq!(bounds, kurbo::Rect::new(10.0, 10.0, 30.0, 50.0));
    }

    #[test]
    fn test_rectangle_and_oval_drags_are_inert() {
        for tool in [ToolKind::Rectangle, ToolKind::Oval] {
            let mut canvas = Canvas::new();
            canvas.apply_toolbar_action(ToolbarAction::SelectTool(tool)).unwrap();
            drag(&mut canvas, &[(0.0, 0.0), (50.0, 50.0), (100.0, 80.0)]);
            assert!(canvas.strokes().is_empty());
            assert!(canvas.elements().is_empty());
            assert!(!canvas.is_drawing());
        }
    }

    #[test]
    fn test_pinch_during_drag_discards_stroke() {
        let mut canvas = Canvas::new();
        canvas.handle_pointer_event(PointerEvent::Down {
            id: 0,
            position: Point::new(0.0, 0.0),
        });
        canvas.handle_pointer_event(PointerEvent::Move {
            id: 0,
            position: Point::new(40.0, 40.0),
        });
        assert!(canvas.is_drawing());

        canvas.handle_pointer_event(PointerEvent::Down {
            id: 1,
            position: Point::new(100.0, 0.0),
        });
        assert!(!canvas.is_drawing());

        canvas.handle_pointer_event(PointerEvent::Move {
            id: 1,
            position: Point::new(200.0, 0.0),
        });
        assert!(canvas.camera().zoom > 1.0);
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn test_invalid_stroke_width_ignored() {
        let mut canvas = Canvas::new();
        canvas.set_stroke_width(-1.0);
        assert!((canvas.current_style().stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_not_implemented() {
        let mut canvas = Canvas::new();
        assert!(matches!(canvas.save(), Err(SaveError::NotImplemented)));
        assert!(matches!(
            canvas.apply_toolbar_action(ToolbarAction::Save),
            Err(SaveError::NotImplemented)
        ));
    }

    #[test]
    fn test_save_with_handler() {
        struct Counter(usize);
        impl SaveHandler for Counter {
            fn save(&mut self, snapshot: CanvasSnapshot<'_>) -> Result<(), SaveError> {
                self.0 = snapshot.strokes.len();
                Ok(())
            }
        }

        let mut canvas = Canvas::new();
        drag(&mut canvas, &[(0.0, 0.0), (30.0, 50.0)]);
        let mut handler = Counter(0);
        canvas.save_with(&mut handler).unwrap();
        assert_eq!(handler.0, 1);
    }
}
