use crossterm::event::KeyEvent;

use crate::config::EditorConfig;

use super::buffer::{EditorBuffer, Motion, Selection};
use super::coalesce::Coalescer;
use super::format::{FormatOp, Mutation, apply_format, insert_at_selection};
use super::history::History;
use super::keymap::{self, KeyOutcome, Shortcut};
use super::prompt::LinkPrompt;

type ChangeListener = Box<dyn FnMut(&str)>;

/// A markdown editor instance: document, selection, undo history and the
/// typing coalescer.
///
/// Free typing is committed to history once the configured quiet period
/// passes without another edit (driven by [`tick`](Self::tick)). Formatting,
/// shortcuts, undo and redo are discrete steps: they commit any pending
/// typing first and then act immediately.
///
/// Time is passed in as `now_ms`, milliseconds since any fixed epoch.
pub struct Editor {
    buffer: EditorBuffer,
    history: History,
    pending: Coalescer<String>,
    config: EditorConfig,
    listeners: Vec<ChangeListener>,
}

impl Editor {
    pub fn new(initial: &str, config: EditorConfig) -> Self {
        let delay_ms = u64::try_from(config.debounce.as_millis()).unwrap_or(u64::MAX);
        Self {
            buffer: EditorBuffer::from_text(initial),
            history: History::new(initial),
            pending: Coalescer::new(delay_ms),
            config,
            listeners: Vec::new(),
        }
    }

    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The current document.
    pub fn value(&self) -> String {
        self.buffer.text()
    }

    /// Replace the document from outside the editor.
    ///
    /// Pending typing is committed first, then the new value is recorded as
    /// its own history entry. Change listeners are not notified; the caller
    /// already knows the value.
    pub fn set_value(&mut self, text: &str) {
        self.flush();
        let caret = self.buffer.caret();
        self.buffer.replace_all(text, caret);
        self.history.record(text);
    }

    /// Register a callback run with the new document after every mutation.
    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn selection(&self) -> Selection {
        self.buffer.selection()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.buffer.set_selection(selection);
    }

    pub fn select_all(&mut self) {
        self.buffer.select_all();
    }

    /// Move the caret; never touches the document or history.
    pub fn navigate(&mut self, motion: Motion, extend: bool) {
        self.buffer.apply_motion(motion, extend);
    }

    pub fn move_to(&mut self, line: usize, col: usize) {
        self.buffer.move_to(line, col);
    }

    /// Type `text` over the selection. Coalesced into history.
    pub fn type_text(&mut self, text: &str, now_ms: u64) {
        if text.is_empty() && self.selection().is_caret() {
            return;
        }
        self.buffer.insert_str(text);
        self.after_typing(now_ms);
    }

    pub fn type_char(&mut self, ch: char, now_ms: u64) {
        self.buffer.insert_char(ch);
        self.after_typing(now_ms);
    }

    /// Backspace. Coalesced into history.
    pub fn delete_back(&mut self, now_ms: u64) -> bool {
        let changed = self.buffer.delete_back();
        if changed {
            self.after_typing(now_ms);
        }
        changed
    }

    /// Delete. Coalesced into history.
    pub fn delete_forward(&mut self, now_ms: u64) -> bool {
        let changed = self.buffer.delete_forward();
        if changed {
            self.after_typing(now_ms);
        }
        changed
    }

    /// Apply a formatting operation as its own undo step.
    ///
    /// Returns `false` when a link/image prompt was cancelled; the document
    /// and history are then untouched.
    pub fn apply(&mut self, op: FormatOp, prompt: &mut dyn LinkPrompt) -> bool {
        self.flush();
        let text = self.value();
        let Some(mutation) = apply_format(&text, self.selection(), op, prompt) else {
            tracing::debug!(op = op.label(), "format abandoned");
            return false;
        };
        tracing::debug!(op = op.label(), caret = mutation.caret, "format applied");
        self.commit(&mutation);
        true
    }

    /// Insert a literal newline as its own undo step.
    pub fn insert_line_break(&mut self) {
        self.flush();
        let mutation = insert_at_selection(&self.value(), self.selection(), "\n");
        self.commit(&mutation);
    }

    /// Step back one history entry. `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        self.flush();
        let Some(snapshot) = self.history.undo().map(str::to_owned) else {
            return false;
        };
        self.restore(&snapshot);
        true
    }

    /// Step forward one history entry. `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        self.flush();
        let Some(snapshot) = self.history.redo().map(str::to_owned) else {
            return false;
        };
        self.restore(&snapshot);
        true
    }

    pub const fn can_undo(&self) -> bool {
        self.history.can_undo() || self.pending.is_pending()
    }

    pub fn can_redo(&self) -> bool {
        !self.pending.is_pending() && self.history.can_redo()
    }

    /// Commit pending typing once the quiet period has passed.
    ///
    /// Returns `true` if a history entry was added.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.pending
            .take_ready(now_ms)
            .is_some_and(|snapshot| self.record(snapshot))
    }

    /// Commit pending typing immediately.
    pub fn flush(&mut self) -> bool {
        self.pending
            .flush()
            .is_some_and(|snapshot| self.record(snapshot))
    }

    /// Whether typed text is waiting for the quiet period.
    pub const fn is_coalescing(&self) -> bool {
        self.pending.is_pending()
    }

    /// When pending typing will be committed, if any.
    pub fn commit_deadline_ms(&self) -> Option<u64> {
        self.pending.deadline_ms()
    }

    /// Run a shortcut.
    ///
    /// Returns `false` if it changed nothing (boundary undo/redo,
    /// abandoned link).
    pub fn execute(&mut self, shortcut: Shortcut, prompt: &mut dyn LinkPrompt) -> bool {
        match shortcut {
            Shortcut::Bold => self.apply(FormatOp::Bold, prompt),
            Shortcut::Italic => self.apply(FormatOp::Italic, prompt),
            Shortcut::Link => self.apply(FormatOp::Link, prompt),
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::LineBreak => {
                self.insert_line_break();
                true
            }
        }
    }

    /// Dispatch a key event through the shortcut table.
    ///
    /// A recognised shortcut is [`KeyOutcome::Handled`] even when it turns
    /// out to be a no-op, so the host never also types the key.
    pub fn handle_key(&mut self, key: &KeyEvent, prompt: &mut dyn LinkPrompt) -> KeyOutcome {
        let Some(shortcut) = keymap::dispatch(key) else {
            return KeyOutcome::Ignored;
        };
        self.execute(shortcut, prompt);
        KeyOutcome::Handled
    }

    /// Word count of the document.
    pub fn word_count(&self) -> usize {
        crate::stats::word_count(&self.value())
    }

    /// Character count of the document.
    pub fn char_count(&self) -> usize {
        self.buffer.len_chars()
    }

    /// HTML preview of the current document.
    pub fn preview(&self) -> String {
        crate::preview::render(&self.value())
    }

    /// Tear the editor down, dropping any uncommitted typing timer.
    pub fn finish(mut self) -> String {
        if self.pending.cancel() {
            tracing::debug!("editor finished with pending edit; timer cancelled");
        }
        self.value()
    }

    // --- Private helpers ---

    fn after_typing(&mut self, now_ms: u64) {
        let value = self.value();
        self.notify(&value);
        self.pending.queue(value, now_ms);
    }

    fn commit(&mut self, mutation: &Mutation) {
        self.buffer.replace_all(&mutation.text, mutation.caret);
        self.record(mutation.text.clone());
        self.notify(&mutation.text);
    }

    fn restore(&mut self, snapshot: &str) {
        let caret = self.buffer.caret();
        self.buffer.replace_all(snapshot, caret);
        self.notify(snapshot);
    }

    fn record(&mut self, snapshot: String) -> bool {
        let added = self.history.record(snapshot);
        if added {
            tracing::debug!(
                index = self.history.index(),
                entries = self.history.snapshot_count(),
                "history commit"
            );
        }
        added
    }

    fn notify(&mut self, value: &str) {
        for listener in &mut self.listeners {
            listener(value);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("", EditorConfig::default())
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        if self.pending.cancel() {
            tracing::trace!("editor dropped; pending commit cancelled");
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("buffer", &self.buffer)
            .field("history_index", &self.history.index())
            .field("history_len", &self.history.snapshot_count())
            .field("coalescing", &self.pending.is_pending())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
