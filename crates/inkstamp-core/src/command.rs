//! Replayable drawing commands.

use crate::surface::{DEFAULT_LINE_WIDTH, Surface};
use kurbo::{BezPath, Circle, Point, Shape};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a command.
pub type CommandId = Uuid;

/// Tolerance used when flattening circles into paths.
const PATH_TOLERANCE: f64 = 0.1;

/// Color used for sticker glyphs.
pub const GLYPH_COLOR: Color = Color::from_rgba8(0, 0, 0, 255);

/// What a command draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Ink line; the modifier is a hue angle.
    Line,
    /// Repeated glyph stamps; the modifier is a rotation in degrees.
    Sticker { glyph: String },
}

impl CommandKind {
    /// Kind for an optional glyph selector (no glyph means ink).
    pub fn from_glyph(glyph: Option<&str>) -> Self {
        match glyph {
            Some(glyph) => CommandKind::Sticker {
                glyph: glyph.to_string(),
            },
            None => CommandKind::Line,
        }
    }

    /// The sticker glyph, if any.
    pub fn glyph(&self) -> Option<&str> {
        match self {
            CommandKind::Line => None,
            CommandKind::Sticker { glyph } => Some(glyph),
        }
    }
}

/// A single stroke: the unit of undo/redo and rendering.
///
/// Kind, size and modifier are fixed when the command is created; only the
/// point path grows afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    id: CommandId,
    points: Vec<Point>,
    kind: CommandKind,
    size: f64,
    modifier: f64,
}

impl Command {
    /// Create an empty command.
    pub fn new(kind: CommandKind, size: f64, modifier: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            kind,
            size,
            modifier,
        }
    }

    /// Create an ink line command.
    pub fn line(size: f64, hue: f64) -> Self {
        Self::new(CommandKind::Line, size, hue)
    }

    /// Create a sticker command.
    pub fn sticker(glyph: impl Into<String>, size: f64, rotation_deg: f64) -> Self {
        Self::new(
            CommandKind::Sticker {
                glyph: glyph.into(),
            },
            size,
            rotation_deg,
        )
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn modifier(&self) -> f64 {
        self.modifier
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point to the path.
    pub fn grow(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Render the anchor at the first point.
    pub fn place(&self, surface: &mut dyn Surface) {
        let Some(&anchor) = self.points.first() else {
            return;
        };

        match &self.kind {
            CommandKind::Line => {
                let color = hue_color(self.modifier);
                let disc = Circle::new(anchor, self.size / 2.0).to_path(PATH_TOLERANCE);
                surface.fill_path(&disc, color);
                surface.stroke_path(&disc, color);
            }
            CommandKind::Sticker { glyph } => {
                surface.fill_glyph(glyph, anchor, self.size, self.modifier, GLYPH_COLOR);
            }
        }
    }

    /// Render the path beyond the anchor.
    pub fn drag(&self, surface: &mut dyn Surface) {
        if self.points.is_empty() {
            return;
        }

        match &self.kind {
            CommandKind::Line => {
                let mut path = BezPath::new();
                path.move_to(self.points[0]);
                for point in &self.points {
                    path.line_to(*point);
                }

                surface.set_line_width(self.size);
                surface.stroke_path(&path, hue_color(self.modifier));
                surface.set_line_width(DEFAULT_LINE_WIDTH);
            }
            CommandKind::Sticker { glyph } => {
                for stamp in self.stamp_points() {
                    surface.fill_glyph(glyph, stamp, self.size, self.modifier, GLYPH_COLOR);
                }
            }
        }
    }

    /// Render the anchor, then the path over it.
    pub fn display(&self, surface: &mut dyn Surface) {
        self.place(surface);
        self.drag(surface);
    }

    /// Points beyond the anchor where a sticker gets stamped.
    ///
    /// A stamp lands on the first sample at least `size` away from the previous
    /// stamp, so stamp density does not depend on the pointer sampling rate.
    pub fn stamp_points(&self) -> Vec<Point> {
        let Some((&first, rest)) = self.points.split_first() else {
            return Vec::new();
        };

        let mut last_stamp = first;
        let mut stamps = Vec::new();
        for &point in rest {
            let dx = point.x - last_stamp.x;
            let dy = point.y - last_stamp.y;
            if (dx * dx + dy * dy).sqrt() >= self.size {
                stamps.push(point);
                last_stamp = point;
            }
        }
        stamps
    }
}

/// Fully saturated color at 50% lightness for a hue angle in degrees.
///
/// Hues outside 0..360 wrap around the color wheel.
pub fn hue_color(hue_deg: f64) -> Color {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_u8 = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::from_rgba8(to_u8(r), to_u8(g), to_u8(b), 255)
}
