//! Application shell: configuration, toolbar dispatch and export file output.

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{UiAction, UiState};
use inkstamp_core::tool::{DEFAULT_STICKERS, THICK_SIZE, THIN_SIZE, ToolError};
use inkstamp_core::{DEFAULT_EXPORT_SCALE, PointerEvent, Sketchpad};
use inkstamp_render::{ExportOptions, RasterSurface, RendererError, export_image, load_font};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
    #[error("{0}")]
    Usage(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub thin_size: f64,
    pub thick_size: f64,
    pub stickers: Vec<String>,
    pub default_modifier: f64,
    pub export_scale: u32,
    /// Preferred font for sticker glyphs. The built-in font covers the rest.
    pub font_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "inkstamp".to_string(),
            width: 256,
            height: 256,
            thin_size: THIN_SIZE,
            thick_size: THICK_SIZE,
            stickers: DEFAULT_STICKERS.iter().map(|s| s.to_string()).collect(),
            default_modifier: 0.0,
            export_scale: DEFAULT_EXPORT_SCALE,
            font_path: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Read a configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// The application: one drawing surface plus its toolbar.
pub struct App {
    config: AppConfig,
    pad: Sketchpad<RasterSurface>,
    ui_state: UiState,
    export_options: ExportOptions,
    exported: Vec<PathBuf>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("ui_state", &self.ui_state)
            .field("exported", &self.exported)
            .finish()
    }
}

impl App {
    /// Build the surface, load the sticker font and apply the initial tool.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let font = match &config.font_path {
            Some(path) => Some(load_font(std::fs::read(path)?)?),
            None => None,
        };

        let surface = RasterSurface::new(config.width, config.height)?.with_font(font.clone());
        let mut pad = Sketchpad::new(surface);
        pad.set_tool_size(config.thin_size)?;
        pad.set_tool_modifier(config.default_modifier);

        let export_options = ExportOptions::new().with_scale(config.export_scale).with_font(font);
        let mut ui_state = UiState::new(&config.stickers);
        ui_state.sync(&pad);

        log::info!("Starting {} ({}x{})", config.title, config.width, config.height);
        Ok(Self {
            config,
            pad,
            ui_state,
            export_options,
            exported: Vec::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pad(&self) -> &Sketchpad<RasterSurface> {
        &self.pad
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    /// Files written by exports so far, oldest first.
    pub fn exported(&self) -> &[PathBuf] {
        &self.exported
    }

    /// Apply a toolbar action.
    pub fn handle_ui_action(&mut self, action: UiAction) -> AppResult<()> {
        match action {
            UiAction::Clear => self.pad.clear_all(),
            UiAction::Undo => {
                if self.pad.undo() {
                    log::info!("Undo performed");
                } else {
                    log::info!("Nothing to undo");
                }
            }
            UiAction::Redo => {
                if self.pad.redo() {
                    log::info!("Redo performed");
                } else {
                    log::info!("Nothing to redo");
                }
            }
            UiAction::Thin => self.pad.set_tool_size(self.config.thin_size)?,
            UiAction::Thick => self.pad.set_tool_size(self.config.thick_size)?,
            UiAction::Line => self.pad.set_tool_glyph(None)?,
            UiAction::Sticker { glyph } => self.pad.set_tool_glyph(Some(&glyph))?,
            UiAction::CustomSticker { text } => {
                if let Some(glyph) = self.ui_state.add_custom_sticker(&text) {
                    self.pad.set_tool_glyph(Some(&glyph))?;
                }
            }
            UiAction::SetModifier { value } => self.pad.set_tool_modifier(value),
            UiAction::Export => {
                self.export_png()?;
            }
        }
        self.ui_state.sync(&self.pad);
        Ok(())
    }

    /// Forward a pointer event in surface-local coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pad.handle_pointer_event(event);
        self.ui_state.sync(&self.pad);
    }

    /// Handle a key press. Returns true if it was bound to an action.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool) -> AppResult<bool> {
        match ShortcutRegistry::action_for(key, ctrl, shift) {
            Some(action) => {
                self.handle_ui_action(action)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Export the drawing and write it to the output directory.
    pub fn export_png(&mut self) -> AppResult<PathBuf> {
        let png_data = export_image(&self.pad, &self.export_options)?;

        std::fs::create_dir_all(&self.config.output_dir)?;
        let path = self
            .config
            .output_dir
            .join(format!("{}-{}.png", self.config.title, self.exported.len() + 1));
        std::fs::write(&path, &png_data)?;

        log::info!("Wrote {} ({} bytes)", path.display(), png_data.len());
        self.exported.push(path.clone());
        Ok(path)
    }
}
