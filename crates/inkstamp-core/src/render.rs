//! Full-surface redraw and export replay.

use crate::command::Command;
use crate::cursor::CursorPreview;
use crate::surface::Surface;
use kurbo::{Affine, Point, Rect, Shape};
use peniko::Color;

/// Background painted under exported images.
pub const EXPORT_BACKGROUND: Color = Color::from_rgba8(255, 255, 255, 255);

/// Export multiplier used when the shell does not pick one.
pub const DEFAULT_EXPORT_SCALE: u32 = 4;

/// Clear the surface and replay every command, oldest first, then the preview.
pub fn render_frame(
    surface: &mut dyn Surface,
    commands: &[Command],
    preview: Option<&CursorPreview>,
) {
    surface.clear();
    for command in commands {
        command.display(surface);
    }
    if let Some(preview) = preview {
        preview.display(surface);
    }
}

/// Replay commands onto an export target over an opaque background.
///
/// The target is expected to be `scale` times the interactive surface in each
/// dimension; drawing happens under a uniform scale transform so strokes land
/// exactly where they would on screen, magnified.
pub fn render_export(target: &mut dyn Surface, commands: &[Command], scale: f64) {
    let previous = target.transform();

    target.clear();
    target.set_transform(Affine::IDENTITY);
    let background = Rect::from_origin_size(Point::ZERO, target.size());
    target.fill_path(&background.to_path(0.1), EXPORT_BACKGROUND);

    target.set_transform(Affine::scale(scale));
    for command in commands {
        command.display(target);
    }

    target.set_transform(previous);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use crate::tool::ToolState;

    fn stroke(from: Point, to: Point, hue: f64) -> Command {
        let mut command = Command::line(3.0, hue);
        command.grow(from);
        command.grow(to);
        command
    }

    #[test]
    fn test_frame_draws_commands_in_order_then_preview() {
        let commands = vec![
            stroke(Point::new(0.0, 0.0), Point::new(5.0, 5.0), 0.0),
            stroke(Point::new(5.0, 0.0), Point::new(0.0, 5.0), 120.0),
        ];
        let preview = CursorPreview::new(Point::new(9.0, 9.0), &ToolState::new());

        let mut surface = RecordingSurface::new(10.0, 10.0);
        render_frame(&mut surface, &commands, Some(&preview));

        let strokes = surface.strokes();
        // dot outline + polyline per command, then the preview dot outline
        assert_eq!(strokes.len(), 5);
        assert_eq!(surface.clear_count(), 1);

        let Some(DrawOp::Fill { path, .. }) = surface
            .ops()
            .iter()
            .rev()
            .find(|op| matches!(op, DrawOp::Fill { .. }))
        else {
            panic!("preview dot missing");
        };
        assert!((path.bounding_box().center().x - 9.0).abs() < 0.01);
    }

    #[test]
    fn test_export_fills_background_and_scales() {
        let commands = vec![stroke(Point::new(1.0, 1.0), Point::new(2.0, 2.0), 0.0)];
        let mut target = RecordingSurface::new(40.0, 40.0);
        render_export(&mut target, &commands, 4.0);

        match &target.ops()[0] {
            DrawOp::Fill { path, color, transform } => {
                let bounds = path.bounding_box();
                assert!((bounds.width() - 40.0).abs() < f64::EPSILON);
                assert_eq!(color.to_rgba8().a, 255);
                assert_eq!(*transform, Affine::IDENTITY);
            }
            other => panic!("expected background fill, got {other:?}"),
        }
        assert!(target.ops()[1..].iter().all(|op| match op {
            DrawOp::Fill { transform, .. } | DrawOp::Stroke { transform, .. } =>
                *transform == Affine::scale(4.0),
            _ => false,
        }));
        assert_eq!(target.transform(), Affine::IDENTITY);
    }
}
