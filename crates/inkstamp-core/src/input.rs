//! Pointer input state machine.
//!
//! Turns pointer events into command creation, growth and finalization. The
//! machine owns no commands itself: the active stroke lives in [`History`] from
//! the moment it is created, and the machine only remembers where.

use crate::command::Command;
use crate::history::History;
use crate::tool::ToolState;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Change notifications produced by input and history operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// The committed drawing changed.
    DrawingChanged,
    /// The cursor preview moved, appeared or disappeared.
    ToolMoved,
}

/// Pointer events in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    /// Delivered even when the pointer is released outside the surface.
    Up { position: Point },
    Enter { position: Point },
    Leave,
}

/// Native pointer appearance the shell should apply over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NativeCursor {
    #[default]
    Default,
    /// Hidden while the rendered tool preview stands in for it.
    Hidden,
}

/// Stroke state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    /// A stroke is in progress; `index` locates it in the committed stack.
    Drawing { index: usize },
}

/// Pointer state machine driving command creation.
#[derive(Debug, Clone, Default)]
pub struct InputMachine {
    state: StrokeState,
    /// Pointer position while it is over the surface.
    hover: Option<Point>,
    native_cursor: NativeCursor,
}

impl InputMachine {
    /// Create an idle machine with the pointer outside the surface.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// Check if a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Pointer position if it is over the surface.
    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    pub fn native_cursor(&self) -> NativeCursor {
        self.native_cursor
    }

    /// Dispatch a pointer event to the matching transition.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        tool: &ToolState,
        history: &mut History,
    ) -> Vec<Signal> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, tool, history),
            PointerEvent::Move { position } => self.pointer_move(position, history),
            PointerEvent::Up { position } => self.pointer_up(position, history),
            PointerEvent::Enter { position } => self.pointer_enter(position),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    /// Start a stroke from a snapshot of the tool.
    pub fn pointer_down(
        &mut self,
        position: Point,
        tool: &ToolState,
        history: &mut History,
    ) -> Vec<Signal> {
        if self.is_drawing() {
            log::warn!("Pointer down during a stroke; finishing the previous stroke");
            self.finish();
        }

        let index = history.commit(tool.begin_command(position));
        self.state = StrokeState::Drawing { index };
        self.hover = Some(position);
        log::debug!("Idle -> Drawing (command #{index})");

        vec![Signal::DrawingChanged, Signal::ToolMoved]
    }

    /// Grow the active stroke and move the preview.
    pub fn pointer_move(&mut self, position: Point, history: &mut History) -> Vec<Signal> {
        let mut signals = Vec::with_capacity(2);

        if let Some(command) = self.active_command(history) {
            command.grow(position);
            signals.push(Signal::DrawingChanged);
        }

        self.hover = Some(position);
        signals.push(Signal::ToolMoved);
        signals
    }

    /// Finish the active stroke. A no-op while idle.
    ///
    /// Strokes that already moved get the release point appended, which closes
    /// the final segment even if the pointer left the surface before release.
    pub fn pointer_up(&mut self, position: Point, history: &mut History) -> Vec<Signal> {
        let Some(command) = self.active_command(history) else {
            return Vec::new();
        };

        if command.len() > 1 {
            command.grow(position);
        }
        self.state = StrokeState::Idle;
        log::debug!("Drawing -> Idle");

        let mut signals = vec![Signal::DrawingChanged];
        if self.hover.is_some() {
            self.hover = Some(position);
            signals.push(Signal::ToolMoved);
        }
        signals
    }

    /// Show the preview in place of the native pointer.
    pub fn pointer_enter(&mut self, position: Point) -> Vec<Signal> {
        self.hover = Some(position);
        self.native_cursor = NativeCursor::Hidden;
        vec![Signal::ToolMoved]
    }

    /// Drop the preview and restore the native pointer.
    ///
    /// An active stroke keeps going; only release ends it.
    pub fn pointer_leave(&mut self) -> Vec<Signal> {
        self.hover = None;
        self.native_cursor = NativeCursor::Default;
        vec![Signal::ToolMoved]
    }

    /// Return to idle without touching the active command.
    /// Returns true if a stroke was in progress.
    pub fn finish(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        self.state = StrokeState::Idle;
        was_drawing
    }

    fn active_command<'h>(&self, history: &'h mut History) -> Option<&'h mut Command> {
        match self.state {
            StrokeState::Drawing { index } => history.get_mut(index),
            StrokeState::Idle => None,
        }
    }
}
