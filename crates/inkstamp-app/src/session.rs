//! Scripted sessions: a JSON list of pointer events, toolbar actions and key
//! presses replayed against the app as if a user produced them.

use crate::app::{App, AppResult};
use crate::ui::UiAction;
use inkstamp_core::PointerEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionStep {
    Pointer {
        event: PointerEvent,
    },
    Action {
        action: UiAction,
    },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub steps: Vec<SessionStep>,
}

impl Session {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Replay every step in order, stopping at the first error.
    pub fn replay(&self, app: &mut App) -> AppResult<()> {
        log::info!("Replaying {} steps", self.steps.len());
        for step in &self.steps {
            match step {
                SessionStep::Pointer { event } => app.handle_pointer(*event),
                SessionStep::Action { action } => app.handle_ui_action(action.clone())?,
                SessionStep::Key { key, ctrl, shift } => {
                    if !app.handle_key(key, *ctrl, *shift)? {
                        log::debug!("Unbound key {key:?}");
                    }
                }
            }
        }
        Ok(())
    }
}
