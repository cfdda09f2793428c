//! Gesture scripts: recorded pointer events and toolbar actions.

use kurbo::Size;
use pluckboard_core::canvas::{Canvas, SaveError};
use pluckboard_core::config::{CanvasConfig, ConfigError};
use pluckboard_core::input::PointerEvent;
use pluckboard_core::toolbar::ToolbarAction;
use pluckboard_render::{DisplayList, Layer, RenderContext, Renderer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Pointer(PointerEvent),
    Toolbar(ToolbarAction),
}

/// An ordered list of scripted inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// What the final frame contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    pub strokes: usize,
    pub elements: usize,
    pub replay_copies: usize,
    pub grid_calls: usize,
    pub element_calls: usize,
    pub live_stroke_calls: usize,
    pub replay_calls: usize,
}

/// Replay a script on a fresh canvas and render one frame.
pub fn run_script(script: &Script, config: &CanvasConfig, viewport: Size) -> FrameSummary {
    let mut canvas = Canvas::with_config(config);

    for step in &script.steps {
        match *step {
            ScriptStep::Pointer(event) => canvas.handle_pointer_event(event),
            ScriptStep::Toolbar(action) => match canvas.apply_toolbar_action(action) {
                Ok(()) => {}
                Err(SaveError::NotImplemented) => log::info!("Skipping save step"),
                Err(err) => log::warn!("Toolbar action failed: {err}"),
            },
        }
    }

    let mut list = DisplayList::new();
    let ctx = RenderContext::new(&canvas, viewport).with_config(config);
    list.build_scene(&ctx);

    FrameSummary {
        strokes: canvas.strokes().len(),
        elements: canvas.elements().len(),
        replay_copies: canvas.replay().len(),
        grid_calls: list.count(Layer::Grid),
        element_calls: list.count(Layer::Elements),
        live_stroke_calls: list.count(Layer::LiveStroke),
        replay_calls: list.count(Layer::Replay),
    }
}
