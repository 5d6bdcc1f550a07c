//! Tool preview drawn in place of the native pointer.

use crate::surface::Surface;
use crate::tool::ToolState;
use kurbo::Point;

/// Ephemeral preview of what the next stroke's anchor will look like.
///
/// Never stored in history and never exported.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPreview {
    pub position: Point,
    pub tool: ToolState,
}

impl CursorPreview {
    /// Snapshot the tool at the pointer position.
    pub fn new(position: Point, tool: &ToolState) -> Self {
        Self {
            position,
            tool: tool.clone(),
        }
    }

    /// Draw the preview: a dot for ink, a single rotated stamp for stickers.
    pub fn display(&self, surface: &mut dyn Surface) {
        self.tool.begin_command(self.position).place(surface);
    }
}
