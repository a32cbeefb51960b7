// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # stackit-editor
//!
//! A markdown composer for question and answer drafts.
//!
//! The library is a UI-agnostic editing engine:
//! - Selection-aware formatting (bold, headings, lists, links, images...)
//! - Linear undo/redo history with typing coalescing
//! - Keyboard shortcut dispatch
//! - A regex-based markdown to HTML preview
//!
//! The `stackit-editor` binary hosts it in the terminal.
//!
//! ## Architecture
//!
//! The terminal host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state, owning the [`editor::Editor`]
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`editor`]: Document, selection, history, formatting and shortcuts
//! - [`preview`]: Markdown to HTML pipeline
//! - [`submit`]: Question and answer request bodies
//! - [`config`]: Editor configuration and saved flags
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod preview;
pub mod stats;
pub mod submit;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::config::EditorConfig;
    pub use crate::editor::{Editor, FormatOp, LinkPrompt, Selection, Shortcut};
    pub use crate::error::{ConfigError, SubmitError};
}
