//! Terminal host for the editor.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Mode, Model, PromptDialog, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::EditorConfig;

/// Owns the startup options and runs the event loop.
pub struct App {
    initial: String,
    config: EditorConfig,
    file_path: Option<PathBuf>,
    preview: bool,
}

impl App {
    /// Create an application editing `initial`.
    pub fn new(initial: impl Into<String>, config: EditorConfig) -> Self {
        Self {
            initial: initial.into(),
            config,
            file_path: None,
            preview: false,
        }
    }

    /// Save to `path` on Ctrl+S.
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }

    /// Start on the preview surface.
    pub const fn with_preview(mut self, enabled: bool) -> Self {
        self.preview = enabled;
        self
    }
}
