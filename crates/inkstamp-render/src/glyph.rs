//! Glyph outlines as kurbo paths.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::{Font, FontArc, GlyphId, Outline, OutlineCurve};
use kurbo::{Affine, BezPath, Point, Shape};

/// Embedded DejaVu Sans, used for glyphs the configured font does not cover.
static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// The built-in sticker font.
pub fn fallback_font() -> RenderResult<FontArc> {
    FontArc::try_from_slice(DEJAVU_SANS).map_err(|e| RendererError::Font(e.to_string()))
}

/// Build the outline of `text` at `font_size` pixels per em, with its ink
/// bounds centered on the origin and y pointing down.
///
/// Characters the font has no glyph for are skipped. Returns `None` when
/// nothing is left to draw (e.g. emoji in a font without them).
pub fn glyph_path(font: &FontArc, text: &str, font_size: f64) -> Option<BezPath> {
    let mut path = BezPath::new();
    let mut pen_x = 0.0;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if id.0 == 0 {
            continue;
        }
        if let Some(prev) = previous {
            pen_x += f64::from(font.kern_unscaled(prev, id));
        }
        if let Some(outline) = font.outline(id) {
            append_outline(&mut path, &outline, pen_x);
        }
        pen_x += f64::from(font.h_advance_unscaled(id));
        previous = Some(id);
    }

    centered(font, path, font_size)
}

/// Outline of the font's missing-glyph box, centered like [`glyph_path`].
pub fn missing_glyph_path(font: &FontArc, font_size: f64) -> Option<BezPath> {
    let mut path = BezPath::new();
    append_outline(&mut path, &font.outline(GlyphId(0))?, 0.0);
    centered(font, path, font_size)
}

/// Scale a path in font units to `font_size` and center its bounds on the origin.
fn centered(font: &FontArc, mut path: BezPath, font_size: f64) -> Option<BezPath> {
    if path.elements().is_empty() {
        return None;
    }
    let scale = font_size / f64::from(font.units_per_em()?);

    // Font units are y-up.
    path.apply_affine(Affine::scale_non_uniform(scale, -scale));
    let center = path.bounding_box().center();
    path.apply_affine(Affine::translate(-center.to_vec2()));
    Some(path)
}

/// Append a glyph outline, starting a new closed contour whenever a curve does
/// not continue from the previous one.
fn append_outline(path: &mut BezPath, outline: &Outline, offset_x: f64) {
    let to_point = |p: ab_glyph::Point| Point::new(f64::from(p.x) + offset_x, f64::from(p.y));

    let mut cursor: Option<Point> = None;
    for curve in &outline.curves {
        let (start, end) = match curve {
            OutlineCurve::Line(a, b) => (*a, *b),
            OutlineCurve::Quad(a, _, b) => (*a, *b),
            OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
        };

        let start = to_point(start);
        if cursor != Some(start) {
            if cursor.is_some() {
                path.close_path();
            }
            path.move_to(start);
        }

        match curve {
            OutlineCurve::Line(_, b) => path.line_to(to_point(*b)),
            OutlineCurve::Quad(_, c, b) => path.quad_to(to_point(*c), to_point(*b)),
            OutlineCurve::Cubic(_, c1, c2, b) => {
                path.curve_to(to_point(*c1), to_point(*c2), to_point(*b))
            }
        }
        cursor = Some(to_point(end));
    }

    if cursor.is_some() {
        path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn pt(x: f32, y: f32) -> ab_glyph::Point {
        ab_glyph::point(x, y)
    }

    #[test]
    fn test_contours_split_on_discontinuity() {
        let outline = Outline {
            bounds: ab_glyph::Rect {
                min: pt(0.0, 0.0),
                max: pt(10.0, 10.0),
            },
            curves: vec![
                OutlineCurve::Line(pt(0.0, 0.0), pt(10.0, 0.0)),
                OutlineCurve::Line(pt(10.0, 0.0), pt(0.0, 10.0)),
                OutlineCurve::Line(pt(0.0, 10.0), pt(0.0, 0.0)),
                OutlineCurve::Quad(pt(20.0, 0.0), pt(25.0, 5.0), pt(30.0, 0.0)),
            ],
        };

        let mut path = BezPath::new();
        append_outline(&mut path, &outline, 100.0);

        let moves: Vec<_> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::MoveTo(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(moves, vec![Point::new(100.0, 0.0), Point::new(120.0, 0.0)]);

        let closes = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::ClosePath))
            .count();
        assert_eq!(closes, 2);
    }

    #[test]
    fn test_fallback_font_outlines_are_centered() {
        let font = fallback_font().unwrap();
        let star = glyph_path(&font, "★", 20.0).unwrap();
        let bounds = star.bounding_box();
        assert!(bounds.center().x.abs() < 1e-6);
        assert!(bounds.center().y.abs() < 1e-6);
        assert!(bounds.width() > 5.0 && bounds.width() < 30.0);
    }

    #[test]
    fn test_uncovered_characters_skipped() {
        let font = fallback_font().unwrap();
        assert!(glyph_path(&font, "🐸", 20.0).is_none());
        assert!(glyph_path(&font, "", 20.0).is_none());
        assert!(missing_glyph_path(&font, 20.0).is_some());
    }

    #[test]
    fn test_default_stickers_have_outlines() {
        let font = fallback_font().unwrap();
        for sticker in inkstamp_core::DEFAULT_STICKERS {
            assert!(glyph_path(&font, sticker, 20.0).is_some(), "{sticker} has no outline");
        }
    }
}
