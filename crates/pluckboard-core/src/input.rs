//! Pointer events and gesture recognition.
//!
//! Raw pointer events from the host are classified into two disjoint gesture
//! families: single-pointer draw gestures (tap, drag) and two-pointer
//! transforms (pinch zoom, pan, rotation).

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Identifier of a touch contact (mouse input uses 0).
pub type PointerId = u64;

/// Distances below this are treated as coincident pointers.
const MIN_PINCH_DISTANCE: f64 = 1e-6;

/// Raw pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { id: PointerId, position: Point },
    Move { id: PointerId, position: Point },
    Up { id: PointerId, position: Point },
    Cancel { id: PointerId },
}

impl PointerEvent {
    /// Convert a winit touch event.
    pub fn from_winit_touch(touch: &winit::event::Touch) -> Self {
        use winit::event::TouchPhase;

        let id = touch.id;
        let position = Point::new(touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started => PointerEvent::Down { id, position },
            TouchPhase::Moved => PointerEvent::Move { id, position },
            TouchPhase::Ended => PointerEvent::Up { id, position },
            TouchPhase::Cancelled => PointerEvent::Cancel { id },
        }
    }

    pub fn id(&self) -> PointerId {
        match *self {
            PointerEvent::Down { id, .. }
            | PointerEvent::Move { id, .. }
            | PointerEvent::Up { id, .. }
            | PointerEvent::Cancel { id } => id,
        }
    }
}

/// Recognized gesture, positions in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Press and release without exceeding the touch slop.
    Tap { position: Point },
    /// Single-pointer drag started at the press origin.
    DragStart { position: Point },
    /// Single-pointer drag moved.
    DragMove { position: Point, delta: Vec2 },
    /// Single-pointer drag ended normally.
    DragEnd,
    /// Single-pointer drag aborted (second pointer or cancellation).
    DragCancel,
    /// Incremental two-pointer transform since the previous update.
    Transform {
        centroid: Point,
        pan: Vec2,
        zoom: f64,
        rotation: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Idle,
    /// One pointer down, slop not yet exceeded.
    Pressed { id: PointerId, origin: Point },
    Dragging { id: PointerId, last: Point },
    Transforming,
    /// Transform ended with pointers still down; waits for all to lift.
    Suspended,
}

/// Classifies raw pointer events into gestures.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    /// Active pointers in press order.
    pointers: Vec<(PointerId, Point)>,
    mode: Mode,
    touch_slop: f64,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(8.0)
    }
}

impl GestureRecognizer {
    /// Create a recognizer with the given touch slop in screen pixels.
    pub fn new(touch_slop: f64) -> Self {
        Self {
            pointers: Vec::new(),
            mode: Mode::Idle,
            touch_slop: touch_slop.max(0.0),
        }
    }

    /// Number of pointers currently down.
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Whether a single-pointer drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, Mode::Dragging { .. })
    }

    /// Whether a two-pointer transform is in progress.
    pub fn is_transforming(&self) -> bool {
        self.mode == Mode::Transforming
    }

    /// Process a pointer event and return the gestures it completes.
    pub fn process(&mut self, event: PointerEvent) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        match event {
            PointerEvent::Down { id, position } => self.on_down(id, position, &mut out),
            PointerEvent::Move { id, position } => self.on_move(id, position, &mut out),
            PointerEvent::Up { id, position } => self.on_up(id, Some(position), &mut out),
            PointerEvent::Cancel { id } => self.on_up(id, None, &mut out),
        }
        out
    }

    fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers.iter().find(|(pid, _)| *pid == id).map(|(_, p)| *p)
    }

    fn on_down(&mut self, id: PointerId, position: Point, out: &mut Vec<GestureEvent>) {
        if let Some(entry) = self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            entry.1 = position;
            return;
        }
        self.pointers.push((id, position));

        match (self.mode, self.pointers.len()) {
            (Mode::Idle, 1) => {
                self.mode = Mode::Pressed { id, origin: position };
            }
            (Mode::Dragging { .. }, n) if n >= 2 => {
                log::debug!("Second pointer down, cancelling drag");
                out.push(GestureEvent::DragCancel);
                self.mode = Mode::Transforming;
            }
            (Mode::Pressed { .. } | Mode::Suspended, n) if n >= 2 => {
                self.mode = Mode::Transforming;
            }
            _ => {}
        }
    }

    fn on_move(&mut self, id: PointerId, position: Point, out: &mut Vec<GestureEvent>) {
        if self.position_of(id).is_none() {
            return;
        }
        // Pair state before this pointer moved, for the transform delta.
        let pair_before = self.pair();
        if let Some(entry) = self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            entry.1 = position;
        }

        match self.mode {
            Mode::Pressed { id: pressed, origin } if pressed == id => {
                if (position - origin).hypot() > self.touch_slop {
                    out.push(GestureEvent::DragStart { position: origin });
                    out.push(GestureEvent::DragMove {
                        position,
                        delta: position - origin,
                    });
                    self.mode = Mode::Dragging { id, last: position };
                }
            }
            Mode::Dragging { id: dragging, last } if dragging == id => {
                out.push(GestureEvent::DragMove {
                    position,
                    delta: position - last,
                });
                self.mode = Mode::Dragging { id, last: position };
            }
            Mode::Transforming => {
                if let (Some(before), Some(after)) = (pair_before, self.pair()) {
                    if before != after {
                        out.push(transform_between(before, after));
                    }
                }
            }
            _ => {}
        }
    }

    fn on_up(&mut self, id: PointerId, position: Option<Point>, out: &mut Vec<GestureEvent>) {
        if self.position_of(id).is_none() {
            return;
        }
        self.pointers.retain(|(pid, _)| *pid != id);

        self.mode = match self.mode {
            Mode::Pressed { id: pressed, .. } if pressed == id => {
                if let Some(position) = position {
                    out.push(GestureEvent::Tap { position });
                }
                Mode::Idle
            }
            Mode::Dragging { id: dragging, .. } if dragging == id => {
                out.push(if position.is_some() {
                    GestureEvent::DragEnd
                } else {
                    GestureEvent::DragCancel
                });
                Mode::Idle
            }
            Mode::Transforming if self.pointers.len() >= 2 => Mode::Transforming,
            Mode::Transforming | Mode::Suspended if !self.pointers.is_empty() => Mode::Suspended,
            _ if self.pointers.is_empty() => Mode::Idle,
            other => other,
        };
    }

    /// The first two active pointers.
    fn pair(&self) -> Option<(Point, Point)> {
        match self.pointers.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }
}

/// Incremental transform between two pointer-pair snapshots.
fn transform_between(before: (Point, Point), after: (Point, Point)) -> GestureEvent {
    let centroid_before = before.0.midpoint(before.1);
    let centroid = after.0.midpoint(after.1);

    let span_before = before.1 - before.0;
    let span_after = after.1 - after.0;

    let distance_before = span_before.hypot();
    let zoom = if distance_before > MIN_PINCH_DISTANCE {
        span_after.hypot() / distance_before
    } else {
        1.0
    };
    let rotation = span_after.atan2() - span_before.atan2();

    GestureEvent::Transform {
        centroid,
        pan: centroid - centroid_before,
        zoom,
        rotation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(id: PointerId, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            id,
            position: Point::new(x, y),
        }
    }

    fn mv(id: PointerId, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            id,
            position: Point::new(x, y),
        }
    }

    fn up(id: PointerId, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            id,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_tap() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.process(down(0, 10.0, 10.0)).is_empty());
        assert!(rec.process(mv(0, 12.0, 11.0)).is_empty());
        assert_eq!(
            rec.process(up(0, 12.0, 11.0)),
            vec![GestureEvent::Tap {
                position: Point::new(12.0, 11.0)
            }]
        );
        assert_eq!(rec.active_pointers(), 0);
    }

    #[test]
    fn test_drag_starts_at_origin_after_slop() {
        let mut rec = GestureRecognizer::new(5.0);
        rec.process(down(0, 0.0, 0.0));
        let events = rec.process(mv(0, 10.0, 0.0));
        assert_eq!(
            events,
            vec![
                GestureEvent::DragStart {
                    position: Point::ZERO
                },
                GestureEvent::DragMove {
                    position: Point::new(10.0, 0.0),
                    delta: Vec2::new(10.0, 0.0)
                },
            ]
        );
        assert!(rec.is_dragging());

        let events = rec.process(mv(0, 10.0, 4.0));
        assert_eq!(
            events,
            vec![GestureEvent::DragMove {
                position: Point::new(10.0, 4.0),
                delta: Vec2::new(0.0, 4.0)
            }]
        );
        assert_eq!(rec.process(up(0, 10.0, 4.0)), vec![GestureEvent::DragEnd]);
        assert!(!rec.is_dragging());
    }

    #[test]
    fn test_second_pointer_cancels_drag() {
        let mut rec = GestureRecognizer::new(0.0);
        rec.process(down(0, 0.0, 0.0));
        rec.process(mv(0, 5.0, 5.0));
        assert_eq!(rec.process(down(1, 100.0, 0.0)), vec![GestureEvent::DragCancel]);
        assert!(rec.is_transforming());
    }

    #[test]
    fn test_pinch_reports_zoom_ratio() {
        let mut rec = GestureRecognizer::default();
        rec.process(down(0, 0.0, 0.0));
        rec.process(down(1, 100.0, 0.0));
        let events = rec.process(mv(1, 200.0, 0.0));
        let [GestureEvent::Transform { zoom, pan, rotation, centroid }] = events.as_slice() else {
            panic!("expected a transform, got {events:?}");
        };
        assert!((zoom - 2.0).abs() < 1e-10);
        assert!((pan.x - 50.0).abs() < 1e-10);
        assert!(rotation.abs() < 1e-10);
        assert_eq!(*centroid, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_two_finger_pan() {
        let mut rec = GestureRecognizer::default();
        rec.process(down(0, 0.0, 0.0));
        rec.process(down(1, 100.0, 0.0));
        rec.process(mv(0, 0.0, 20.0));
        let events = rec.process(mv(1, 100.0, 20.0));
        let [GestureEvent::Transform { pan, .. }] = events.as_slice() else {
            panic!("expected a transform, got {events:?}");
        };
        assert!((pan.y - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_drawing_until_all_pointers_lift() {
        let mut rec = GestureRecognizer::new(0.0);
        rec.process(down(0, 0.0, 0.0));
        rec.process(down(1, 100.0, 0.0));
        rec.process(up(1, 100.0, 0.0));
        assert!(rec.process(mv(0, 50.0, 50.0)).is_empty());
        assert!(rec.process(up(0, 50.0, 50.0)).is_empty());

        rec.process(down(0, 0.0, 0.0));
        let events = rec.process(mv(0, 5.0, 5.0));
        assert!(matches!(events.first(), Some(GestureEvent::DragStart { .. })));
    }

    #[test]
    fn test_cancel_during_drag() {
        let mut rec = GestureRecognizer::new(0.0);
        rec.process(down(7, 0.0, 0.0));
        rec.process(mv(7, 5.0, 5.0));
        assert_eq!(
            rec.process(PointerEvent::Cancel { id: 7 }),
            vec![GestureEvent::DragCancel]
        );
    }

    #[test]
    fn test_unknown_pointer_ignored() {
        let mut rec = GestureRecognizer::default();
        assert!(rec.process(mv(3, 1.0, 1.0)).is_empty());
        assert!(rec.process(up(3, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"type":"down","id":2,"position":{"x":1.0,"y":2.0}}"#).unwrap();
        assert_eq!(event, down(2, 1.0, 2.0));
        assert_eq!(event.id(), 2);
    }

    #[test]
    fn test_from_winit_touch() {
        use winit::dpi::PhysicalPosition;
        use winit::event::{DeviceId, Touch, TouchPhase};

        let touch = |phase| Touch {
            // SAFETY: the conversion never reads the device id.
            device_id: unsafe { DeviceId::dummy() },
            phase,
            location: PhysicalPosition::new(12.0, 34.0),
            force: None,
            id: 5,
        };

        assert_eq!(PointerEvent::from_winit_touch(&touch(TouchPhase::Started)), down(5, 12.0, 34.0));
        assert_eq!(PointerEvent::from_winit_touch(&touch(TouchPhase::Moved)), mv(5, 12.0, 34.0));
        assert_eq!(PointerEvent::from_winit_touch(&touch(TouchPhase::Ended)), up(5, 12.0, 34.0));
        assert_eq!(
            PointerEvent::from_winit_touch(&touch(TouchPhase::Cancelled)),
            PointerEvent::Cancel { id: 5 }
        );
    }
}
