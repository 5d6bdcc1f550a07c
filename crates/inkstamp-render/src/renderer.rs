//! Renderer errors and export options.

use ab_glyph::FontArc;
use inkstamp_core::DEFAULT_EXPORT_SCALE;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Invalid export scale: {0}")]
    InvalidScale(u32),
    #[error("Font error: {0}")]
    Font(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Parameters for an export.
#[derive(Clone)]
pub struct ExportOptions {
    /// Linear resolution multiplier relative to the interactive surface.
    pub scale: u32,
    /// Font used to rasterize sticker glyphs.
    pub font: Option<FontArc>,
}

impl std::fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportOptions")
            .field("scale", &self.scale)
            .field("font", &self.font.as_ref().map(|_| "<font>"))
            .finish()
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_EXPORT_SCALE,
            font: None,
        }
    }
}

impl ExportOptions {
    /// Create options with the default scale and no font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution multiplier.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the sticker font.
    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }
}

/// Parse a TrueType/OpenType font from raw bytes.
pub fn load_font(data: Vec<u8>) -> RenderResult<FontArc> {
    FontArc::try_from_vec(data).map_err(|e| RendererError::Font(e.to_string()))
}
