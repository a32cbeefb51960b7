use ropey::Rope;

/// A range of char offsets into the document, `start <= end`.
///
/// A collapsed selection (`start == end`) is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two offsets in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A collapsed selection at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected chars.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Clamp both ends to `len_chars`.
    pub fn clamped(self, len_chars: usize) -> Self {
        Self::new(self.start.min(len_chars), self.end.min(len_chars))
    }
}

/// Caret position in line/column form, used by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in chars.
    pub col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Every caret motion the host can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Step(Direction),
    Home,
    End,
    WordLeft,
    WordRight,
    Start,
    Finish,
}

/// A text buffer backed by a rope data structure.
///
/// Holds the document and the selection as `anchor`/`head` char offsets.
/// The head is where the caret is drawn; extending a selection moves only
/// the head.
pub struct EditorBuffer {
    rope: Rope,
    anchor: usize,
    head: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            anchor: 0,
            head: 0,
            col_memory: None,
        }
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Char offset of the first char of `line_idx`.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// Replace the selection, clamping both ends to the document.
    ///
    /// The head is placed at `selection.end`.
    pub fn set_selection(&mut self, selection: Selection) {
        let sel = selection.clamped(self.len_chars());
        self.anchor = sel.start;
        self.head = sel.end;
        self.col_memory = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.len_chars();
        self.col_memory = None;
    }

    /// Char offset of the caret.
    pub const fn caret(&self) -> usize {
        self.head
    }

    /// The caret in line/column form.
    pub fn cursor(&self) -> Cursor {
        let line = self.rope.char_to_line(self.head);
        Cursor::at(line, self.head - self.rope.line_to_char(line))
    }

    /// Replace the whole document and collapse the selection at `caret`.
    pub fn replace_all(&mut self, text: &str, caret: usize) {
        self.rope = Rope::from_str(text);
        let caret = caret.min(self.rope.len_chars());
        self.anchor = caret;
        self.head = caret;
        self.col_memory = None;
    }

    /// Insert a character, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut tmp));
    }

    /// Insert a string, replacing any selection. Caret ends after the text.
    pub fn insert_str(&mut self, s: &str) {
        let sel = self.selection();
        if s.is_empty() && sel.is_caret() {
            return;
        }
        if !sel.is_caret() {
            self.rope.remove(sel.start..sel.end);
        }
        self.rope.insert(sel.start, s);
        self.place(sel.start + s.chars().count(), false);
    }

    /// Delete the selection or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.remove_selection() {
            return true;
        }
        if self.head == 0 {
            return false;
        }
        let at = self.head - 1;
        self.rope.remove(at..self.head);
        self.place(at, false);
        true
    }

    /// Delete the selection or the character at the caret (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.remove_selection() {
            return true;
        }
        if self.head >= self.len_chars() {
            return false;
        }
        self.rope.remove(self.head..=self.head);
        true
    }

    /// Apply a motion, extending the selection when `extend` is set.
    pub fn apply_motion(&mut self, motion: Motion, extend: bool) {
        match motion {
            Motion::Step(direction) => self.move_cursor(direction, extend),
            Motion::Home => self.move_home(extend),
            Motion::End => self.move_end(extend),
            Motion::WordLeft => self.move_word_left(extend),
            Motion::WordRight => self.move_word_right(extend),
            Motion::Start => self.place(0, extend),
            Motion::Finish => self.place(self.len_chars(), extend),
        }
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        match direction {
            Direction::Left => self.move_left(extend),
            Direction::Right => self.move_right(extend),
            Direction::Up => self.move_vertical(-1, extend),
            Direction::Down => self.move_vertical(1, extend),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.place(self.rope.line_to_char(line), extend);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.place(self.rope.line_to_char(line) + self.line_len(line), extend);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let Cursor { line, col } = self.cursor();
        let start = self.rope.line_to_char(line);
        if col == 0 {
            if line > 0 {
                let prev = line - 1;
                self.place(self.rope.line_to_char(prev) + self.line_len(prev), extend);
            }
            return;
        }

        let chars: Vec<char> = self.line_at(line).unwrap_or_default().chars().collect();
        let mut idx = col.min(chars.len());
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        while idx > 0 && is_word_char(chars[idx - 1]) {
            idx -= 1;
        }
        self.place(start + idx, extend);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let Cursor { line, col } = self.cursor();
        let len = self.line_len(line);
        if col >= len {
            if line + 1 < self.line_count() {
                self.place(self.rope.line_to_char(line + 1), extend);
            }
            return;
        }

        let chars: Vec<char> = self.line_at(line).unwrap_or_default().chars().collect();
        let mut idx = col;
        while idx < chars.len() && is_word_char(chars[idx]) {
            idx += 1;
        }
        while idx < chars.len() && !is_word_char(chars[idx]) {
            idx += 1;
        }
        self.place(self.rope.line_to_char(line) + idx, extend);
    }

    /// Move cursor to a specific line and column, collapsing the selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.place(self.rope.line_to_char(line) + col, false);
    }

    // --- Private helpers ---

    fn place(&mut self, pos: usize, extend: bool) {
        self.head = pos.min(self.len_chars());
        if !extend {
            self.anchor = self.head;
        }
        self.col_memory = None;
    }

    fn remove_selection(&mut self) -> bool {
        let sel = self.selection();
        if sel.is_caret() {
            return false;
        }
        self.rope.remove(sel.start..sel.end);
        self.place(sel.start, false);
        true
    }

    fn move_left(&mut self, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_caret() {
            self.place(sel.start, false);
        } else {
            self.place(self.head.saturating_sub(1), extend);
        }
    }

    fn move_right(&mut self, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_caret() {
            self.place(sel.end, false);
        } else {
            self.place(self.head + 1, extend);
        }
    }

    fn move_vertical(&mut self, delta: isize, extend: bool) {
        let Cursor { line, col } = self.cursor();
        let target = line.checked_add_signed(delta);
        let Some(target) = target.filter(|t| *t < self.line_count()) else {
            return;
        };
        let wanted = self.col_memory.unwrap_or(col);
        let pos = self.rope.line_to_char(target) + wanted.min(self.line_len(target));
        self.place(pos, extend);
        self.col_memory = Some(wanted);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("selection", &self.selection())
            .finish()
    }
}
