//! The drawing engine: tool, history, input machine and surface in one place.

use crate::command::Command;
use crate::cursor::CursorPreview;
use crate::history::History;
use crate::input::{InputMachine, NativeCursor, PointerEvent, Signal};
use crate::render::{render_export, render_frame};
use crate::surface::Surface;
use crate::tool::{ToolResult, ToolState};
use kurbo::{Point, Size};

/// Callback notified after the engine has handled a signal.
pub type SignalListener = Box<dyn FnMut(Signal)>;

/// An interactive drawing surface with undo/redo.
///
/// Every operation runs to completion, including the redraw triggered by the
/// signals it emits, before returning to the caller.
pub struct Sketchpad<S: Surface> {
    surface: S,
    tool: ToolState,
    history: History,
    input: InputMachine,
    listeners: Vec<SignalListener>,
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for Sketchpad<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketchpad")
            .field("surface", &self.surface)
            .field("tool", &self.tool)
            .field("history", &self.history)
            .field("input", &self.input)
            .field(
                "listeners",
                &format!("<{} listeners>", self.listeners.len()),
            )
            .finish()
    }
}

impl<S: Surface> Sketchpad<S> {
    /// Create an empty drawing on `surface` with the default tool.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            tool: ToolState::default(),
            history: History::new(),
            input: InputMachine::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for drawing-changed and tool-moved signals.
    pub fn subscribe(&mut self, listener: impl FnMut(Signal) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Size of the interactive surface.
    pub fn size(&self) -> Size {
        self.surface.size()
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Commands making up the current drawing, oldest first.
    pub fn commands(&self) -> &[Command] {
        self.history.committed()
    }

    /// Number of commands in the current drawing.
    pub fn command_count(&self) -> usize {
        self.history.committed().len()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    /// How the shell should show the native pointer over the surface.
    pub fn native_cursor(&self) -> NativeCursor {
        self.input.native_cursor()
    }

    /// The tool preview, present while the pointer is over the surface.
    pub fn cursor_preview(&self) -> Option<CursorPreview> {
        self.input
            .hover()
            .map(|position| CursorPreview::new(position, &self.tool))
    }

    // --- Tool selection: affects the next stroke only, no redraw ---

    pub fn set_tool_size(&mut self, size: f64) -> ToolResult<()> {
        self.tool.set_size(size)
    }

    pub fn set_tool_glyph(&mut self, glyph: Option<&str>) -> ToolResult<()> {
        self.tool.set_glyph(glyph)
    }

    pub fn set_tool_modifier(&mut self, modifier: f64) {
        self.tool.set_modifier(modifier);
    }

    // --- Pointer input ---

    /// Feed any pointer event through the input machine.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        let signals = self.input.handle(event, &self.tool, &mut self.history);
        self.emit_all(signals);
    }

    pub fn pointer_down(&mut self, position: Point) {
        self.handle_pointer_event(PointerEvent::Down { position });
    }

    pub fn pointer_move(&mut self, position: Point) {
        self.handle_pointer_event(PointerEvent::Move { position });
    }

    pub fn pointer_up(&mut self, position: Point) {
        self.handle_pointer_event(PointerEvent::Up { position });
    }

    pub fn pointer_enter(&mut self, position: Point) {
        self.handle_pointer_event(PointerEvent::Enter { position });
    }

    pub fn pointer_leave(&mut self) {
        self.handle_pointer_event(PointerEvent::Leave);
    }

    // --- History ---

    /// Undo the most recent stroke, ending any stroke in progress first.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.input.finish();
        let undone = self.history.undo();
        if undone {
            self.emit(Signal::DrawingChanged);
        }
        undone
    }

    /// Redo the most recently undone stroke.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.input.finish();
        let redone = self.history.redo();
        if redone {
            self.emit(Signal::DrawingChanged);
        }
        redone
    }

    /// Discard the whole drawing, including redo, and redraw.
    pub fn clear_all(&mut self) {
        self.input.finish();
        self.history.clear();
        log::debug!("Cleared drawing");
        self.emit(Signal::DrawingChanged);
    }

    // --- Rendering ---

    /// Clear and redraw the surface from history plus the cursor preview.
    pub fn redraw(&mut self) {
        let preview = self.cursor_preview();
        render_frame(
            &mut self.surface,
            self.history.committed(),
            preview.as_ref(),
        );
    }

    /// Replay the drawing onto an export target `scale` times this surface's size.
    ///
    /// The preview is never exported.
    pub fn export_onto(&self, target: &mut dyn Surface, scale: f64) {
        render_export(target, self.history.committed(), scale);
    }

    fn emit_all(&mut self, signals: Vec<Signal>) {
        for signal in signals {
            self.emit(signal);
        }
    }

    fn emit(&mut self, signal: Signal) {
        self.redraw();
        for listener in &mut self.listeners {
            listener(signal);
        }
    }
}
