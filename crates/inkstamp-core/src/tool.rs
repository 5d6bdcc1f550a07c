//! Current drawing parameters selected by the shell.

use crate::command::{Command, CommandKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line size selected by the "thin" preset.
pub const THIN_SIZE: f64 = 1.0;

/// Line size selected by the "thick" preset.
pub const THICK_SIZE: f64 = 5.0;

/// Stickers offered before the user adds any of their own.
pub const DEFAULT_STICKERS: &[&str] = &["★", "✿", "♥"];

/// Errors from tool selection.
#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("Sticker glyph must contain visible text")]
    EmptyGlyph,
    #[error("Invalid tool size: {0}")]
    InvalidSize(f64),
}

/// Result type for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Tool parameters read when a new command is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    /// Line width or glyph font size in pixels.
    pub size: f64,
    /// Selected sticker glyph; `None` draws ink lines.
    pub glyph: Option<String>,
    /// Hue for lines, rotation in degrees for stickers.
    pub modifier: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            size: THIN_SIZE,
            glyph: None,
            modifier: 0.0,
        }
    }
}

impl ToolState {
    /// Create the default tool (thin black-hue ink).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stroke width or glyph size.
    pub fn set_size(&mut self, size: f64) -> ToolResult<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ToolError::InvalidSize(size));
        }
        self.size = size;
        Ok(())
    }

    /// Select a sticker glyph, or ink lines with `None`.
    ///
    /// Glyph text is trimmed; blank text is rejected and leaves the tool unchanged.
    pub fn set_glyph(&mut self, glyph: Option<&str>) -> ToolResult<()> {
        self.glyph = match glyph {
            Some(text) => Some(validate_glyph(text)?),
            None => None,
        };
        Ok(())
    }

    /// Set the hue/rotation modifier. Values are passed through unclamped.
    pub fn set_modifier(&mut self, modifier: f64) {
        self.modifier = modifier;
    }

    /// The command kind this tool currently produces.
    pub fn kind(&self) -> CommandKind {
        CommandKind::from_glyph(self.glyph.as_deref())
    }

    /// Create a new command seeded at `point` from a copy of the current parameters.
    pub fn begin_command(&self, point: Point) -> Command {
        let mut command = Command::new(self.kind(), self.size, self.modifier);
        command.grow(point);
        command
    }
}

/// Trim a custom glyph and reject it when nothing visible remains.
pub fn validate_glyph(text: &str) -> ToolResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ToolError::EmptyGlyph);
    }
    Ok(trimmed.to_string())
}
