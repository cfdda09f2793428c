//! Toolbar model: tool, color and width selection plus clear/save actions.

use crate::config::CanvasConfig;
use crate::shapes::SerializableColor;
use crate::tools::ToolKind;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// An action issued from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ToolbarAction {
    SelectTool(ToolKind),
    SetColor(SerializableColor),
    SetStrokeWidth(f64),
    Clear,
    Save,
}

/// Theme colors used to tint tool buttons.
#[derive(Debug, Clone, Copy)]
pub struct ToolbarTheme {
    /// Tint of the selected tool.
    pub primary: Color,
    /// Tint of unselected tools.
    pub on_surface: Color,
}

impl Default for ToolbarTheme {
    fn default() -> Self {
        Self {
            primary: Color::from_rgba8(59, 130, 246, 255), // Blue
            on_surface: Color::from_rgba8(30, 30, 30, 255),
        }
    }
}

/// Choices offered by the toolbar.
#[derive(Debug, Clone)]
pub struct Toolbar {
    pub palette: Vec<SerializableColor>,
    pub stroke_widths: Vec<f64>,
    pub theme: ToolbarTheme,
}

impl Toolbar {
    /// Build the toolbar from configuration with the default theme.
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            palette: config.palette.clone(),
            stroke_widths: config.stroke_widths.clone(),
            theme: ToolbarTheme::default(),
        }
    }

    pub fn with_theme(mut self, theme: ToolbarTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Tint for a tool button given the active tool.
    pub fn button_tint(&self, tool: ToolKind, active: ToolKind) -> Color {
        if tool == active {
            self.theme.primary
        } else {
            self.theme.on_surface
        }
    }

    /// Every tool with its button tint, in toolbar order.
    pub fn tool_tints(&self, active: ToolKind) -> Vec<(ToolKind, Color)> {
        ToolKind::ALL
            .iter()
            .map(|&tool| (tool, self.button_tint(tool, active)))
            .collect()
    }

    /// Action for the palette entry at `index`.
    pub fn color_action(&self, index: usize) -> Option<ToolbarAction> {
        self.palette.get(index).copied().map(ToolbarAction::SetColor)
    }

    /// Action for the width preset at `index`.
    pub fn width_action(&self, index: usize) -> Option<ToolbarAction> {
        self.stroke_widths
            .get(index)
            .copied()
            .map(ToolbarAction::SetStrokeWidth)
    }
}
