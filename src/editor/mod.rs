//! Markdown editing engine.
//!
//! Provides a rope-backed document with a selection, linear undo history
//! with typing coalescing, selection-aware formatting operations and the
//! keyboard shortcut table. The engine is UI-agnostic; the terminal host
//! in [`crate::app`] drives it.

mod buffer;
mod coalesce;
mod format;
mod history;
mod keymap;
mod prompt;
mod session;

pub use buffer::{Cursor, Direction, EditorBuffer, Motion, Selection};
pub use coalesce::Coalescer;
pub use format::{
    EMOJI_PALETTE, FormatOp, FormatRule, HeadingLevel, IMAGE_ALT_FALLBACK, LINK_PLACEHOLDER,
    Mutation, apply_format, insert_at_selection,
};
pub use history::History;
pub use keymap::{KeyOutcome, Shortcut, dispatch};
pub use prompt::{
    DeclinePrompt, IMAGE_ALT_PROMPT, IMAGE_URL_PROMPT, LINK_URL_PROMPT, LinkPrompt, ScriptedPrompt,
};
pub use session::Editor;
