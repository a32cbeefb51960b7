use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::{
    Editor, FormatOp, IMAGE_ALT_PROMPT, IMAGE_URL_PROMPT, LINK_URL_PROMPT, ScriptedPrompt,
};
use crate::ui::viewport::Viewport;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which surface is shown below the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Edit,
    Preview,
}

/// A link or image dialog collecting answers one question at a time.
///
/// Once every question is answered (or one is cancelled) the answers are
/// replayed into the editor through a [`ScriptedPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDialog {
    op: FormatOp,
    questions: &'static [&'static str],
    answers: Vec<Option<String>>,
    /// Text typed for the current question.
    pub input: String,
}

impl PromptDialog {
    /// A dialog for `op`, or `None` if `op` asks no questions.
    pub fn open(op: FormatOp) -> Option<Self> {
        let questions: &'static [&'static str] = match op {
            FormatOp::Link => &[LINK_URL_PROMPT],
            FormatOp::Image => &[IMAGE_URL_PROMPT, IMAGE_ALT_PROMPT],
            _ => return None,
        };
        Some(Self {
            op,
            questions,
            answers: Vec::new(),
            input: String::new(),
        })
    }

    pub const fn title(&self) -> &'static str {
        match self.op {
            FormatOp::Image => "Insert image",
            _ => "Insert link",
        }
    }

    /// The question currently being asked.
    pub fn question(&self) -> &'static str {
        self.questions
            .get(self.answers.len())
            .copied()
            .unwrap_or_default()
    }

    /// Record the answer to the current question.
    ///
    /// Returns `true` once no further questions should be asked. A blank or
    /// cancelled first answer ends the dialog early since the operation
    /// will be abandoned anyway.
    pub fn answer(&mut self, answer: Option<String>) -> bool {
        self.input.clear();
        let abandon = self.answers.is_empty()
            && answer.as_deref().is_none_or(|a| a.trim().is_empty());
        self.answers.push(answer);
        abandon || self.answers.len() >= self.questions.len()
    }

    /// The collected answers as a prompt the editor can consume.
    pub fn into_script(self) -> (FormatOp, ScriptedPrompt) {
        (self.op, ScriptedPrompt::new(self.answers))
    }
}

/// The complete application state.
pub struct Model {
    /// The editing engine.
    pub editor: Editor,
    /// File the document is saved to, if any.
    pub file_path: Option<PathBuf>,
    pub mode: Mode,
    /// Editing surface scroll state.
    pub viewport: Viewport,
    /// First visible row of the preview.
    pub preview_scroll: usize,
    /// Open link/image dialog.
    pub prompt: Option<PromptDialog>,
    /// Next palette index for emoji insertion.
    pub emoji_cursor: usize,
    /// Milliseconds since the event loop started, as of the last tick.
    pub clock_ms: u64,
    /// Terminal size in columns and rows.
    pub terminal_size: (u16, u16),
    /// Minimum rows for the edit/preview surface.
    pub min_rows: u16,
    /// Set after a first quit attempt with unsaved changes.
    pub quit_confirmed: bool,
    pub should_quit: bool,
    saved_value: String,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("mode", &self.mode)
            .field("prompt", &self.prompt)
            .field("clock_ms", &self.clock_ms)
            .finish_non_exhaustive()
    }
}

impl Model {
    pub fn new(editor: Editor, file_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        let min_rows = editor.config().min_rows().unwrap_or(1);
        let saved_value = editor.value();
        let total_lines = editor.buffer().line_count();
        let mut model = Self {
            editor,
            file_path,
            mode: Mode::Edit,
            viewport: Viewport::new(0, total_lines),
            preview_scroll: 0,
            prompt: None,
            emoji_cursor: 0,
            clock_ms: 0,
            terminal_size,
            min_rows,
            quit_confirmed: false,
            should_quit: false,
            saved_value,
            toast: None,
        };
        model.sync_viewport();
        model
    }

    /// Whether the document differs from what was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.editor.value() != self.saved_value
    }

    pub(super) fn mark_saved(&mut self) {
        self.saved_value = self.editor.value();
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map_or_else(|| "draft".to_string(), |s| s.to_string_lossy().to_string())
    }

    /// Recompute the surface height and keep the caret line on screen.
    pub(super) fn sync_viewport(&mut self) {
        let (width, height) = self.terminal_size;
        let area = ratatui::layout::Rect::new(0, 0, width, height);
        let regions = crate::ui::regions(area, self.min_rows, self.toast.is_some());
        self.viewport.resize(regions.surface.height);
        self.viewport
            .set_total_lines(self.editor.buffer().line_count());
        self.viewport.follow(self.editor.buffer().cursor().line);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Editor::default(), None, (80, 24))
    }
}
