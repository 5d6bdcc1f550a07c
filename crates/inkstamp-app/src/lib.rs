//! inkstamp Application
//!
//! Headless shell around the drawing engine: toolbar actions, keyboard
//! shortcuts, scripted sessions and PNG file output.

mod app;
mod session;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, AppResult};
pub use session::{Session, SessionStep};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{UiAction, UiState};
