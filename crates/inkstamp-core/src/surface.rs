//! Drawing surface abstraction.
//!
//! Commands render through the [`Surface`] trait so the same replay code drives
//! the interactive surface, off-screen export targets, and test recorders.

use kurbo::{Affine, BezPath, Point, Size};
use peniko::Color;

/// Line width every surface starts with and returns to after a wide stroke.
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;

/// A 2D drawing target with a small amount of canvas-like state.
///
/// The transform and line width are sticky: they stay in effect until changed,
/// so callers that alter them are responsible for restoring them.
pub trait Surface {
    /// Size of the drawable area in surface pixels.
    fn size(&self) -> Size;

    /// Reset every pixel to fully transparent.
    fn clear(&mut self);

    /// Current user-to-surface transform.
    fn transform(&self) -> Affine;

    /// Replace the user-to-surface transform.
    fn set_transform(&mut self, transform: Affine);

    /// Current stroke width in user units.
    fn line_width(&self) -> f64;

    /// Set the stroke width used by [`Surface::stroke_path`].
    fn set_line_width(&mut self, width: f64);

    /// Fill a path with the nonzero winding rule.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke a path at the current line width.
    fn stroke_path(&mut self, path: &BezPath, color: Color);

    /// Draw text centered on `center`, rotated clockwise by `rotation_deg`
    /// degrees about that center.
    fn fill_glyph(
        &mut self,
        glyph: &str,
        center: Point,
        font_size: f64,
        rotation_deg: f64,
        color: Color,
    );
}

/// A single recorded draw operation.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Clear,
    Fill {
        path: BezPath,
        color: Color,
        transform: Affine,
    },
    Stroke {
        path: BezPath,
        width: f64,
        color: Color,
        transform: Affine,
    },
    Glyph {
        glyph: String,
        center: Point,
        font_size: f64,
        rotation_deg: f64,
        color: Color,
        transform: Affine,
    },
}

/// Surface that records operations instead of rasterizing them.
///
/// Only the operations issued since the last [`Surface::clear`] are kept in
/// [`RecordingSurface::ops`], mirroring what a real surface would show.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    transform: Affine,
    line_width: f64,
    ops: Vec<DrawOp>,
    clears: usize,
}

impl RecordingSurface {
    /// Create a recorder with the given surface size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            transform: Affine::IDENTITY,
            line_width: DEFAULT_LINE_WIDTH,
            ops: Vec::new(),
            clears: 0,
        }
    }

    /// Operations drawn since the most recent clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of times the surface has been cleared (one per full redraw).
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Whether nothing has been drawn since the last clear.
    pub fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    /// Recorded glyph stamps as `(glyph, center, rotation)` tuples.
    pub fn glyphs(&self) -> Vec<(&str, Point, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Glyph {
                    glyph,
                    center,
                    rotation_deg,
                    ..
                } => Some((glyph.as_str(), *center, *rotation_deg)),
                _ => None,
            })
            .collect()
    }

    /// Recorded strokes as `(width, color)` pairs.
    pub fn strokes(&self) -> Vec<(f64, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke { width, color, .. } => Some((*width, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
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
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
            transform: self.transform,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            width: self.line_width,
            color,
            transform: self.transform,
        });
    }

    fn fill_glyph(
        &mut self,
        glyph: &str,
        center: Point,
        font_size: f64,
        rotation_deg: f64,
        color: Color,
    ) {
        self.ops.push(DrawOp::Glyph {
            glyph: glyph.to_string(),
            center,
            font_size,
            rotation_deg,
            color,
            transform: self.transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_previous_ops() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fill_glyph(
            "*",
            Point::new(1.0, 1.0),
            12.0,
            0.0,
            Color::from_rgba8(0, 0, 0, 255),
        );
        assert!(!surface.is_blank());

        surface.clear();
        assert!(surface.is_blank());
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn test_stroke_records_current_width() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.set_line_width(7.0);
        surface.stroke_path(&BezPath::new(), Color::from_rgba8(255, 0, 0, 255));
        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 1);
        assert!((strokes[0].0 - 7.0).abs() < f64::EPSILON);
    }
}
