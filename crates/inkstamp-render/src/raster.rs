//! CPU raster surface backed by a tiny-skia pixmap.

use crate::glyph::{fallback_font, glyph_path, missing_glyph_path};
use crate::renderer::{RenderResult, RendererError};
use ab_glyph::FontArc;
use image::{Rgba, RgbaImage};
use inkstamp_core::surface::{DEFAULT_LINE_WIDTH, Surface};
use kurbo::{Affine, BezPath, PathEl, Point, Size};
use peniko::Color;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Largest accepted width or height, in pixels.
pub const MAX_SURFACE_SIDE: u32 = 16_384;

/// Largest accepted pixel buffer, in bytes.
pub const MAX_SURFACE_BYTES: u64 = 256 * 1024 * 1024;

/// Anti-aliased software renderer implementing [`Surface`].
///
/// Sticker glyphs come from the configured font, then from the built-in
/// fallback font. Text neither covers is stamped as the missing-glyph box.
#[derive(Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
    transform: Affine,
    line_width: f64,
    font: Option<FontArc>,
    fallback: FontArc,
    warned_missing_glyph: bool,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("transform", &self.transform)
            .field("line_width", &self.line_width)
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl RasterSurface {
    /// Create a fully transparent surface.
    ///
    /// Fails with [`RendererError::InvalidSize`] for empty or oversized
    /// dimensions instead of attempting the allocation.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let invalid = RendererError::InvalidSize { width, height };
        let bytes = u64::from(width) * u64::from(height) * 4;
        if width == 0
            || height == 0
            || width > MAX_SURFACE_SIDE
            || height > MAX_SURFACE_SIDE
            || bytes > MAX_SURFACE_BYTES
        {
            return Err(invalid);
        }

        let pixmap = Pixmap::new(width, height).ok_or(invalid)?;
        Ok(Self {
            pixmap,
            transform: Affine::IDENTITY,
            line_width: DEFAULT_LINE_WIDTH,
            font: None,
            fallback: fallback_font()?,
            warned_missing_glyph: false,
        })
    }

    /// Prefer `font` for sticker glyphs.
    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA value of one pixel, transparent when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixmap
            .pixel(x, y)
            .map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .unwrap_or([0, 0, 0, 0])
    }

    /// Copy the pixels out as a straight-alpha image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| Rgba(self.pixel(x, y)))
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    fn device_transform(&self) -> Transform {
        let [a, b, c, d, e, f] = self.transform.as_coeffs();
        Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
    }

    /// Outline for `glyph`, falling back to the built-in font and then to
    /// the missing-glyph box.
    fn sticker_outline(&mut self, glyph: &str, font_size: f64) -> Option<BezPath> {
        if let Some(path) = self
            .font
            .as_ref()
            .and_then(|font| glyph_path(font, glyph, font_size))
        {
            return Some(path);
        }
        if let Some(path) = glyph_path(&self.fallback, glyph, font_size) {
            return Some(path);
        }

        if !self.warned_missing_glyph {
            log::warn!("No outline for sticker {glyph:?}; stamping the missing-glyph box");
            self.warned_missing_glyph = true;
        }
        missing_glyph_path(&self.fallback, font_size)
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn line_width(&self) -> f64 {
        self.line_width
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let transform = self.device_transform();
        self.pixmap.fill_path(&path, &paint(color), FillRule::Winding, transform, None);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: self.line_width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        let transform = self.device_transform();
        self.pixmap.stroke_path(&path, &paint(color), &stroke, transform, None);
    }

    fn fill_glyph(
        &mut self,
        glyph: &str,
        center: Point,
        font_size: f64,
        rotation_deg: f64,
        color: Color,
    ) {
        let Some(mut path) = self.sticker_outline(glyph, font_size) else {
            return;
        };
        path.apply_affine(
            Affine::translate(center.to_vec2()) * Affine::rotate(rotation_deg.to_radians()),
        );
        self.fill_path(&path, color);
    }
}

fn paint(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path; `None` when it has no drawable segments.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstamp_core::Sketchpad;
    use kurbo::{Rect, Shape};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    /// Inclusive pixel bounds `(min_x, min_y, max_x, max_y)` of non-transparent pixels.
    fn ink_bounds(surface: &RasterSurface) -> (u32, u32, u32, u32) {
        let mut bounds = (u32::MAX, u32::MAX, 0, 0);
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y)[3] > 0 {
                    bounds.0 = bounds.0.min(x);
                    bounds.1 = bounds.1.min(y);
                    bounds.2 = bounds.2.max(x);
                    bounds.3 = bounds.3.max(y);
                }
            }
        }
        assert!(bounds.0 <= bounds.2, "surface is blank");
        bounds
    }

    fn center_of(bounds: (u32, u32, u32, u32)) -> (f64, f64) {
        (
            f64::from(bounds.0 + bounds.2 + 1) / 2.0,
            f64::from(bounds.1 + bounds.3 + 1) / 2.0,
        )
    }

    fn stamp(glyph: &str, size: f64, rotation: f64) -> RasterSurface {
        let mut pad = Sketchpad::new(RasterSurface::new(100, 100).unwrap());
        pad.set_tool_glyph(Some(glyph)).unwrap();
        pad.set_tool_size(size).unwrap();
        pad.set_tool_modifier(rotation);
        pad.pointer_down(Point::new(50.0, 50.0));
        pad.pointer_up(Point::new(50.0, 50.0));
        pad.pointer_leave();
        pad.surface().clone()
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 10),
            Err(RendererError::InvalidSize {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_oversized_surface_rejected_without_allocating() {
        assert!(matches!(
            RasterSurface::new(MAX_SURFACE_SIDE + 1, 1),
            Err(RendererError::InvalidSize { .. })
        ));
        assert!(matches!(
            RasterSurface::new(MAX_SURFACE_SIDE, MAX_SURFACE_SIDE),
            Err(RendererError::InvalidSize { .. })
        ));
        assert!(matches!(
            RasterSurface::new(u32::MAX, u32::MAX),
            Err(RendererError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_fill_rect_covers_pixels() {
        let mut surface = RasterSurface::new(10, 10).unwrap();
        let rect = Rect::new(2.0, 2.0, 5.0, 4.0).to_path(0.1);
        surface.fill_path(&rect, Color::from_rgba8(255, 0, 0, 255));

        assert_eq!(surface.pixel(2, 2), RED);
        assert_eq!(surface.pixel(4, 3), RED);
        assert_eq!(surface.pixel(5, 3), CLEAR);
        assert_eq!(surface.pixel(2, 4), CLEAR);
        assert_eq!(surface.pixel(1, 2), CLEAR);
    }

    #[test]
    fn test_transform_scales_fill() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.set_transform(Affine::scale(4.0));
        let rect = Rect::new(1.0, 1.0, 2.0, 2.0).to_path(0.1);
        surface.fill_path(&rect, Color::from_rgba8(255, 0, 0, 255));

        assert_eq!(surface.pixel(4, 4), RED);
        assert_eq!(surface.pixel(7, 7), RED);
        assert_eq!(surface.pixel(8, 8), CLEAR);
        assert_eq!(surface.pixel(3, 4), CLEAR);
    }

    #[test]
    fn test_stroke_width_follows_line_width() {
        let mut surface = RasterSurface::new(40, 40).unwrap();
        let mut path = BezPath::new();
        path.move_to((5.0, 20.0));
        path.line_to((35.0, 20.0));

        surface.set_line_width(6.0);
        surface.stroke_path(&path, Color::from_rgba8(255, 0, 0, 255));

        assert_eq!(surface.pixel(20, 17), RED);
        assert_eq!(surface.pixel(20, 22), RED);
        assert_eq!(surface.pixel(20, 24), CLEAR);
        assert_eq!(surface.pixel(20, 15), CLEAR);
    }

    #[test]
    fn test_thin_line_is_antialiased() {
        let mut surface = RasterSurface::new(40, 40).unwrap();
        let mut path = BezPath::new();
        path.move_to((5.0, 20.0));
        path.line_to((35.0, 20.0));
        surface.stroke_path(&path, Color::from_rgba8(255, 0, 0, 255));

        let above = surface.pixel(20, 19)[3];
        let below = surface.pixel(20, 20)[3];
        assert!(above > 0 && above < 255);
        assert!(below > 0 && below < 255);
    }

    #[test]
    fn test_sketchpad_line_on_raster() {
        let mut pad = Sketchpad::new(RasterSurface::new(64, 64).unwrap());
        pad.set_tool_size(4.0).unwrap();
        pad.pointer_down(Point::new(10.0, 20.0));
        pad.pointer_move(Point::new(25.0, 20.0));
        pad.pointer_up(Point::new(40.0, 20.0));
        pad.pointer_leave();

        let surface = pad.surface();
        assert_eq!(surface.pixel(25, 20), RED);
        assert_eq!(surface.pixel(39, 19), RED);
        assert_eq!(surface.pixel(25, 30), CLEAR);
    }

    #[test]
    fn test_click_leaves_visible_dot() {
        let mut pad = Sketchpad::new(RasterSurface::new(100, 100).unwrap());
        pad.set_tool_size(5.0).unwrap();
        pad.pointer_down(Point::new(50.0, 50.0));
        pad.pointer_up(Point::new(50.0, 50.0));
        pad.pointer_leave();

        assert_eq!(pad.surface().pixel(50, 50), RED);
        assert_eq!(pad.surface().pixel(49, 49), RED);
        assert_eq!(pad.surface().pixel(56, 50), CLEAR);
    }

    #[test]
    fn test_clear_all_blanks_raster() {
        let mut pad = Sketchpad::new(RasterSurface::new(32, 32).unwrap());
        pad.pointer_down(Point::new(4.0, 4.0));
        pad.pointer_move(Point::new(20.0, 20.0));
        pad.pointer_up(Point::new(28.0, 20.0));
        pad.pointer_leave();
        assert!(!pad.surface().is_blank());

        pad.clear_all();
        assert!(pad.surface().is_blank());
    }

    #[test]
    fn test_sticker_stamp_centered_on_anchor() {
        let surface = stamp("★", 20.0, 0.0);
        let (cx, cy) = center_of(ink_bounds(&surface));
        assert!((cx - 50.0).abs() <= 1.5, "center x {cx}");
        assert!((cy - 50.0).abs() <= 1.5, "center y {cy}");
    }

    #[test]
    fn test_sticker_rotation_turns_about_glyph_center() {
        let upright = ink_bounds(&stamp("♪", 40.0, 0.0));
        let turned = ink_bounds(&stamp("♪", 40.0, 90.0));

        let (w0, h0) = (upright.2 - upright.0, upright.3 - upright.1);
        let (w90, h90) = (turned.2 - turned.0, turned.3 - turned.1);
        assert!(h0 > w0 + 5, "note should be taller than wide: {w0}x{h0}");
        assert!(w90.abs_diff(h0) <= 2, "rotated width {w90} vs height {h0}");
        assert!(h90.abs_diff(w0) <= 2, "rotated height {h90} vs width {w0}");

        let (cx, cy) = center_of(turned);
        assert!((cx - 50.0).abs() <= 1.5 && (cy - 50.0).abs() <= 1.5);
    }

    #[test]
    fn test_uncovered_sticker_still_stamps() {
        let surface = stamp("🐸", 20.0, 0.0);
        assert!(!surface.is_blank());
        let (cx, cy) = center_of(ink_bounds(&surface));
        assert!((cx - 50.0).abs() <= 1.5 && (cy - 50.0).abs() <= 1.5);
    }
}
