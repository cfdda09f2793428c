//! Pluckboard Core Library
//!
//! Platform-agnostic data structures and gesture logic for the Pluckboard
//! drawing canvas: camera transform, gesture recognition, the scene model
//! and the stroke replay layer.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod input;
pub mod replay;
pub mod shapes;
pub mod toolbar;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasSnapshot, SaveError, SaveHandler};
pub use config::{CanvasConfig, ConfigError};
pub use input::{GestureEvent, GestureRecognizer, PointerEvent, PointerId};
pub use replay::{ReplayLayer, ReplayPath};
pub use shapes::{CanvasElement, ElementKind, PluckablePath, SerializableColor, ShapeStyle};
pub use toolbar::{Toolbar, ToolbarAction, ToolbarTheme};
pub use tools::{ToolKind, ToolManager};
