//! Linear undo/redo history of drawing commands.

use crate::command::Command;

/// The committed drawing plus the commands undone from its end.
///
/// `undone` only ever holds commands popped off the end of `committed`, most
/// recent last. Committing a new command discards all of them.
#[derive(Debug, Clone, Default)]
pub struct History {
    committed: Vec<Command>,
    undone: Vec<Command>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command to the drawing and drop the redo stack.
    /// Returns the index of the new command in [`History::committed`].
    pub fn commit(&mut self, command: Command) -> usize {
        log::debug!(
            "Committing command {} (discarding {} undone)",
            command.id(),
            self.undone.len()
        );
        self.committed.push(command);
        self.undone.clear();
        self.committed.len() - 1
    }

    /// Undo the most recent command.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(command) = self.committed.pop() {
            log::debug!("Undo command {}", command.id());
            self.undone.push(command);
            true
        } else {
            false
        }
    }

    /// Redo the most recently undone command.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(command) = self.undone.pop() {
            log::debug!("Redo command {}", command.id());
            self.committed.push(command);
            true
        } else {
            false
        }
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Commands making up the current drawing, oldest first.
    pub fn committed(&self) -> &[Command] {
        &self.committed
    }

    /// Undone commands, most recently undone last.
    pub fn undone(&self) -> &[Command] {
        &self.undone
    }

    /// Mutable access to a committed command.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Command> {
        self.committed.get_mut(index)
    }
}
