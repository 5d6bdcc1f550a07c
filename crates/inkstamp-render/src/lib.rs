//! inkstamp Render Library
//!
//! Anti-aliased CPU rasterization of the inkstamp drawing surface and PNG
//! export.

mod export;
mod glyph;
mod raster;
mod renderer;

pub use export::{ExportResult, encode_png, export_image, export_rgba, export_surface};
pub use glyph::{fallback_font, glyph_path, missing_glyph_path};
pub use raster::{MAX_SURFACE_BYTES, MAX_SURFACE_SIDE, RasterSurface};
pub use renderer::{ExportOptions, RenderResult, RendererError, load_font};
