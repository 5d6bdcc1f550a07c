//! Toolbar model: the actions buttons and sliders produce, and the state they
//! display.

use inkstamp_core::tool::validate_glyph;
use inkstamp_core::{Sketchpad, Surface};
use serde::{Deserialize, Serialize};

/// Actions that can be triggered by the toolbar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiAction {
    /// Remove every stroke, including redo.
    Clear,
    /// Undo the last stroke.
    Undo,
    /// Redo the last undone stroke.
    Redo,
    /// Thin line width preset.
    Thin,
    /// Thick line width preset.
    Thick,
    /// Switch back to drawing ink lines.
    Line,
    /// Pick one of the sticker buttons.
    Sticker { glyph: String },
    /// Text entered in the custom sticker prompt.
    CustomSticker { text: String },
    /// Modifier slider moved (hue for lines, rotation for stickers).
    SetModifier { value: f64 },
    /// Export the drawing to PNG.
    Export,
}

/// UI state that persists across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Sticker buttons, presets first, then custom stickers in creation order.
    pub stickers: Vec<String>,
    /// Glyph of the selected sticker, `None` while drawing lines.
    pub selected_glyph: Option<String>,
    /// Current tool size.
    pub size: f64,
    /// Current slider value.
    pub modifier: f64,
    /// Whether the undo button is enabled.
    pub can_undo: bool,
    /// Whether the redo button is enabled.
    pub can_redo: bool,
    /// Number of strokes in the drawing.
    pub command_count: usize,
}

impl UiState {
    pub fn new(stickers: &[String]) -> Self {
        Self {
            stickers: stickers.to_vec(),
            selected_glyph: None,
            size: 0.0,
            modifier: 0.0,
            can_undo: false,
            can_redo: false,
            command_count: 0,
        }
    }

    /// Mirror the engine state into the toolbar.
    pub fn sync<S: Surface>(&mut self, pad: &Sketchpad<S>) {
        let tool = pad.tool();
        self.selected_glyph = tool.glyph.clone();
        self.size = tool.size;
        self.modifier = tool.modifier;
        self.can_undo = pad.can_undo();
        self.can_redo = pad.can_redo();
        self.command_count = pad.command_count();
    }

    /// Validate prompt input and add it as a sticker button.
    ///
    /// Returns the trimmed glyph, or `None` if the text was blank. Adding a
    /// glyph that already has a button does not duplicate it.
    pub fn add_custom_sticker(&mut self, text: &str) -> Option<String> {
        match validate_glyph(text) {
            Ok(glyph) => {
                if !self.stickers.contains(&glyph) {
                    self.stickers.push(glyph.clone());
                }
                Some(glyph)
            }
            Err(e) => {
                log::warn!("Rejected custom sticker {text:?}: {e}");
                None
            }
        }
    }
}
