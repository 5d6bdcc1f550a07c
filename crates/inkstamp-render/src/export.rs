//! High-resolution PNG export.

use crate::raster::RasterSurface;
use crate::renderer::{ExportOptions, RenderResult, RendererError};
use inkstamp_core::{Sketchpad, Surface};

/// Raw pixels produced by an export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub rgba_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportResult {
    /// Encode the pixels as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.rgba_data, self.width, self.height)
    }
}

/// Render the committed drawing of `pad` onto a fresh raster surface
/// `options.scale` times larger, over an opaque white background.
pub fn export_surface<S: Surface>(
    pad: &Sketchpad<S>,
    options: &ExportOptions,
) -> RenderResult<RasterSurface> {
    if options.scale == 0 {
        return Err(RendererError::InvalidScale(options.scale));
    }

    let size = pad.size();
    let width = scaled_dimension(size.width, options.scale);
    let height = scaled_dimension(size.height, options.scale);

    let mut target = RasterSurface::new(width, height)?.with_font(options.font.clone());
    pad.export_onto(&mut target, f64::from(options.scale));

    log::info!(
        "Exported {} commands at {}x ({}x{})",
        pad.command_count(),
        options.scale,
        width,
        height
    );
    Ok(target)
}

/// Export the drawing as raw RGBA pixels.
pub fn export_rgba<S: Surface>(
    pad: &Sketchpad<S>,
    options: &ExportOptions,
) -> RenderResult<ExportResult> {
    let surface = export_surface(pad, options)?;
    Ok(ExportResult {
        rgba_data: surface.to_image().into_raw(),
        width: surface.width(),
        height: surface.height(),
    })
}

/// Export the drawing as PNG bytes.
pub fn export_image<S: Surface>(
    pad: &Sketchpad<S>,
    options: &ExportOptions,
) -> RenderResult<Vec<u8>> {
    export_rgba(pad, options)?.to_png()
}

/// Encode 8-bit RGBA pixels as a PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("header: {e}")))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RendererError::Encode(format!("data: {e}")))?;
    }

    Ok(png_data)
}

fn scaled_dimension(length: f64, scale: u32) -> u32 {
    (length.max(0.0).round() as u32).saturating_mul(scale)
}
