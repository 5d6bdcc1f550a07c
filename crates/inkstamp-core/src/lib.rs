//! inkstamp Core Library
//!
//! Platform-agnostic drawing commands, undo/redo history and the pointer
//! state machine for the inkstamp drawing surface.

pub mod command;
pub mod cursor;
pub mod history;
pub mod input;
pub mod render;
pub mod sketchpad;
pub mod surface;
pub mod tool;

pub use command::{Command, CommandId, CommandKind, hue_color};
pub use cursor::CursorPreview;
pub use history::History;
pub use input::{InputMachine, NativeCursor, PointerEvent, Signal, StrokeState};
pub use render::{DEFAULT_EXPORT_SCALE, EXPORT_BACKGROUND, render_export, render_frame};
pub use sketchpad::Sketchpad;
pub use surface::{DEFAULT_LINE_WIDTH, DrawOp, RecordingSurface, Surface};
pub use tool::{DEFAULT_STICKERS, THICK_SIZE, THIN_SIZE, ToolError, ToolResult, ToolState};
