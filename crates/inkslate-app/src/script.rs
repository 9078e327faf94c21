//! Drawing scripts: a surface configuration plus the UI events to replay.

use inkslate_core::{ConfigError, DrawingSurface, Point, Rgba, SurfaceConfig, SurfaceError};
use inkslate_render::{RenderError, render_to_bitmap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Script errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Command {index} failed: {source}")]
    Command { index: usize, source: SurfaceError },
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// One inbound surface event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Begin { x: f64, y: f64 },
    Extend { x: f64, y: f64 },
    End,
    Cancel,
    Undo,
    Redo,
    Clear,
    Eraser { enabled: bool },
    LineWidth { width: f64 },
    Color { color: Rgba },
    FillColor { color: Rgba },
    Background { color: Rgba },
    Debug { enabled: bool },
}

/// A configuration and the commands to apply to a fresh surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: SurfaceConfig,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Script {
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a surface and apply every command in order.
    pub fn replay(&self) -> ScriptResult<DrawingSurface> {
        let mut surface = DrawingSurface::new(self.config.clone())?;
        for (index, command) in self.commands.iter().enumerate() {
            apply(&mut surface, command).map_err(|source| ScriptError::Command { index, source })?;
        }
        log::debug!(
            "Replayed {} command(s), {} active stroke(s)",
            self.commands.len(),
            surface.active_records().len()
        );
        Ok(surface)
    }
}

fn apply(surface: &mut DrawingSurface, command: &Command) -> Result<(), SurfaceError> {
    match *command {
        Command::Begin { x, y } => {
            surface.begin_stroke(Point::new(x, y));
        }
        Command::Extend { x, y } => {
            surface.extend_stroke(Point::new(x, y))?;
        }
        Command::End => {
            surface.end_stroke()?;
        }
        Command::Cancel => surface.cancel_stroke(),
        Command::Undo => {
            surface.undo();
        }
        Command::Redo => {
            surface.redo();
        }
        Command::Clear => {
            surface.clear();
        }
        Command::Eraser { enabled } => surface.set_eraser_mode(enabled),
        Command::LineWidth { width } => surface.set_line_width(width)?,
        Command::Color { color } => surface.set_color(color),
        Command::FillColor { color } => surface.set_fill_color(color),
        Command::Background { color } => surface.set_background_color(color),
        Command::Debug { enabled } => surface.set_debug_mode(enabled),
    }
    Ok(())
}

/// Replay the script at `script_path` and write the flattened drawing as PNG.
pub fn run_script(script_path: &Path, output_path: &Path) -> ScriptResult<()> {
    let json = std::fs::read_to_string(script_path)?;
    let surface = Script::from_json(&json)?.replay()?;
    let png_data = render_to_bitmap(&surface).to_png()?;
    std::fs::write(output_path, png_data)?;
    Ok(())
}
