//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Z", true, false, "Undo"),
            Shortcut::new("Z", true, true, "Redo"),
            Shortcut::new("Y", true, false, "Redo"),
            Shortcut::new("E", true, false, "Export to PNG"),
        ]
    }

    /// Map a key press to the toolbar action it stands for.
    ///
    /// `key` is the character produced by the key; case is ignored.
    pub fn action_for(key: &str, ctrl: bool, shift: bool) -> Option<UiAction> {
        if !ctrl {
            return None;
        }
        match key {
            // Ctrl+Z = Undo, Ctrl+Shift+Z = Redo
            "z" | "Z" if shift => Some(UiAction::Redo),
            "z" | "Z" => Some(UiAction::Undo),
            "y" | "Y" => Some(UiAction::Redo),
            "e" | "E" => Some(UiAction::Export),
            _ => None,
        }
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("Z", true, true, "Redo").format(), "Ctrl+Shift+Z");
        assert_eq!(Shortcut::new("E", true, false, "Export").format(), "Ctrl+E");
    }

    #[test]
    fn test_action_for() {
        assert_eq!(ShortcutRegistry::action_for("z", true, false), Some(UiAction::Undo));
        assert_eq!(ShortcutRegistry::action_for("Z", true, true), Some(UiAction::Redo));
        assert_eq!(ShortcutRegistry::action_for("y", true, false), Some(UiAction::Redo));
        assert_eq!(ShortcutRegistry::action_for("e", true, false), Some(UiAction::Export));
        assert_eq!(ShortcutRegistry::action_for("z", false, false), None);
        assert_eq!(ShortcutRegistry::action_for("q", true, false), None);
    }

    #[test]
    fn test_every_registered_shortcut_maps_to_an_action() {
        for shortcut in ShortcutRegistry::all() {
            assert!(
                ShortcutRegistry::action_for(shortcut.key, shortcut.ctrl, shortcut.shift).is_some(),
                "{} has no action",
                shortcut.format()
            );
        }
    }
}
